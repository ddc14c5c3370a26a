use eyre::{ensure, Result};

pub fn description(description: &str) -> Result<()> {
    ensure!(
        !description.contains(&['\n', '\r'] as &[char]),
        "Newline characters are not allowed in the FASTA description: {description}"
    );
    Ok(())
}

/// Sequences may be empty and may hold any symbol except line terminators. Deciding which symbols
/// are meaningful is left to the caller.
pub fn seq(seq: &[u8]) -> Result<()> {
    for (i, &x) in seq.iter().enumerate() {
        ensure!(
            x != b'\n' && x != b'\r',
            "Newline character at index {i} of the FASTA sequence"
        );
    }
    Ok(())
}
