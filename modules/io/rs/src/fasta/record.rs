use super::validate;
use derive_getters::{Dissolve, Getters};
use derive_more::Into;
use eyre::Result;
use std::error::Error;

/// A single FASTA record with the following guarantees:
/// - The description is an arbitrary UTF-8 string, possibly empty.
/// - Neither the description nor the sequence can contain newline characters (CR or LF).
/// - The sequence may be empty.
///
/// There are no guarantees on the biological meaningfulness of the stored sequence. Ambiguity
/// codes, gaps, and lowercase symbols are all valid here; deciding what to keep is up to the caller.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Dissolve, Getters, Into)]
pub struct Record {
    description: String,
    seq: Vec<u8>,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            description: "Default description".to_string(),
            seq: b"ACGT".to_vec(),
        }
    }
}

impl<D, SEQ> TryFrom<(D, SEQ)> for Record
where
    D: TryInto<String, Error: Error + Send + Sync + 'static>,
    SEQ: TryInto<Vec<u8>, Error: Error + Send + Sync + 'static>,
{
    type Error = eyre::Report;

    fn try_from(value: (D, SEQ)) -> Result<Self> {
        Self::new(value.0.try_into()?, value.1.try_into()?)
    }
}

impl Record {
    /// Creates a new FASTA record with the given description and sequence.
    pub fn new(description: String, seq: Vec<u8>) -> Result<Self> {
        Self::validate(&description, &seq)?;
        Ok(Self { description, seq })
    }

    pub fn validate(description: &str, seq: &[u8]) -> Result<()> {
        validate::description(description)?;
        validate::seq(seq)
    }

    /// # Safety
    /// The caller must ensure that all fields remains valid after modification.
    pub unsafe fn raw(&mut self) -> (&mut String, &mut Vec<u8>) {
        (&mut self.description, &mut self.seq)
    }
}
