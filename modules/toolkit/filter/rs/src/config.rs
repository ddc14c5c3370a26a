use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result, WrapErr};

use rnasieve_io_rs::compression::{decode, encode, encode::params::Deflate};

/// SILVA SSU Ref NR99 release the tool was written for.
pub const DEFAULT_INPUT: &str = "SILVA_138.2_SSURef_NR99_tax_silva.fasta";
pub const DEFAULT_OUTPUT: &str = "SILVA_138.2_SSURef_NR99_tax_silva_filtered.fasta";

/// Everything a single filtering run needs to know about its input and output.
#[derive(Clone, PartialEq, Eq, Debug, Dissolve, Getters)]
pub struct Config {
    input: PathBuf,
    output: PathBuf,
    // None = detect from the file signature and extension when the input is opened
    decode: Option<decode::Config>,
    encode: encode::Config,
    line_width: Option<NonZeroUsize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            decode: None,
            encode: encode::Config::infer_from_path(DEFAULT_OUTPUT, Deflate::DEFAULT),
            line_width: None,
        }
    }
}

impl Config {
    /// Output compression is inferred from the output extension with the default DEFLATE level.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Self> {
        let (input, output) = (input.as_ref(), output.as_ref());
        ensure!(
            input != output,
            "Input and output must be different files: {}",
            input.display()
        );

        Ok(Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            decode: None,
            encode: encode::Config::infer_from_path(output, Deflate::DEFAULT),
            line_width: None,
        })
    }

    /// Refuse an output that resolves to the input file, e.g. `./in.fasta` next to `in.fasta` or a
    /// symlink to it. Creating the output would otherwise truncate the input before it is read.
    /// Hard links are not detected.
    pub fn ensure_distinct_files(&self) -> Result<()> {
        if !self.output.exists() {
            return Ok(());
        }
        let input = fs::canonicalize(&self.input)
            .wrap_err_with(|| format!("Failed to resolve input file {}", self.input.display()))?;
        let output = fs::canonicalize(&self.output)
            .wrap_err_with(|| format!("Failed to resolve output file {}", self.output.display()))?;
        ensure!(
            input != output,
            "Input and output resolve to the same file: {}",
            input.display()
        );
        Ok(())
    }

    pub fn with_decode(mut self, decode: decode::Config) -> Self {
        self.decode = Some(decode);
        self
    }

    pub fn with_encode(mut self, encode: encode::Config) -> Self {
        self.encode = encode;
        self
    }

    /// Re-infer the output container using the given compression level.
    pub fn with_compression_level(mut self, level: u8) -> Result<Self> {
        self.encode = encode::Config::infer_from_path(&self.output, Deflate::new(level)?);
        Ok(self)
    }

    pub fn with_line_width(mut self, line_width: Option<NonZeroUsize>) -> Self {
        self.line_width = line_width;
        self
    }
}
