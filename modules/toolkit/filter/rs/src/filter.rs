use derive_more::Display;

/// Taxonomy marker of eukaryotic records, including organellar 16S from mitochondria/plastids.
pub const EUKARYOTIC_MARKER: &str = "eukaryota";

/// Outcome of classifying a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Verdict {
    #[display("keep")]
    Keep,
    #[display("eukaryotic")]
    Eukaryotic,
    #[display("ambiguous alphabet")]
    Ambiguous,
}

/// Case-insensitive (Unicode-aware) search for the eukaryotic taxonomy marker.
pub fn is_eukaryotic(description: &str) -> bool {
    description.to_lowercase().contains(EUKARYOTIC_MARKER)
}

/// Uppercase the sequence and replace every T with U, in place.
pub fn transcribe(seq: &mut [u8]) {
    for x in seq.iter_mut() {
        *x = match x.to_ascii_uppercase() {
            b'T' => b'U',
            upper => upper,
        };
    }
}

/// True iff the set of distinct symbols is exactly {A, C, G, U}.
///
/// Any other symbol rejects the sequence, and so does a sequence that lacks one of the four bases
/// (including the empty one).
pub fn has_canonical_alphabet(seq: &[u8]) -> bool {
    let mut seen = 0u8;
    for x in seq {
        seen |= match x {
            b'A' => 0b0001,
            b'C' => 0b0010,
            b'G' => 0b0100,
            b'U' => 0b1000,
            _ => return false,
        };
    }
    seen == 0b1111
}

/// Classify an already transcribed record. The taxonomy check takes precedence over the alphabet.
pub fn classify(description: &str, transcribed: &[u8]) -> Verdict {
    if is_eukaryotic(description) {
        Verdict::Eukaryotic
    } else if !has_canonical_alphabet(transcribed) {
        Verdict::Ambiguous
    } else {
        Verdict::Keep
    }
}
