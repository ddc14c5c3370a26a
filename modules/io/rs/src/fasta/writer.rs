use super::record::Record;
use crate::compression::encode;
use crate::traits::WriteRecord;
use derive_getters::Dissolve;
use eyre::{Result, WrapErr};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::Path;

/// FASTA writer. Each record is written as a `>description` line followed by the sequence, either
/// on a single line (`line_width = None`) or wrapped at `line_width` columns.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Dissolve)]
pub struct Writer<W> {
    writer: W,
    line_width: Option<NonZeroUsize>,
}

impl<W> Writer<W> {
    pub fn new(writer: W, line_width: Option<NonZeroUsize>) -> Self {
        Self { writer, line_width }
    }
}

impl Writer<()> {
    /// Create (or truncate) the file at `path` and wrap it into the requested compression container.
    pub fn from_path(
        path: impl AsRef<Path>,
        config: &encode::Config,
        line_width: Option<NonZeroUsize>,
    ) -> Result<Writer<encode::Stream<BufWriter<File>>>> {
        let path = path.as_ref();
        let file = File::create(path)
            .wrap_err_with(|| format!("Failed to create FASTA file {}", path.display()))?;
        let stream = encode::Stream::new(BufWriter::new(file), config)?;
        Ok(Writer::new(stream, line_width))
    }
}

impl<W: Write> Writer<encode::Stream<W>> {
    /// Flush all pending records and finalise the compression container.
    pub fn finish(self) -> Result<W> {
        self.writer.finish()
    }
}

impl<W: Write> WriteRecord for Writer<W> {
    type Record = Record;

    fn write_record(&mut self, record: &Self::Record) -> Result<()> {
        self.writer.write_all(b">")?;
        self.writer.write_all(record.description().as_bytes())?;
        self.writer.write_all(b"\n")?;

        match self.line_width {
            None => {
                self.writer.write_all(record.seq())?;
                self.writer.write_all(b"\n")?;
                Ok(())
            }
            Some(width) => record
                .seq()
                .chunks(width.get())
                .try_for_each(|c| -> Result<()> {
                    self.writer.write_all(c)?;
                    self.writer.write_all(b"\n")?;
                    Ok(())
                }),
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::{decode, encode::params::Deflate};
    use crate::fasta::Reader;
    use crate::ReadRecord;
    use std::io::Cursor;

    fn records() -> Result<Vec<Record>> {
        [
            ("seq1 Bacteria", "ACGUACGUAC"),
            ("seq2 Archaea;Euryarchaeota", "GGCCAAUU"),
            ("seq3 empty", ""),
        ]
        .into_iter()
        .map(Record::try_from)
        .collect()
    }

    #[test]
    fn test_single_line_layout() -> Result<()> {
        let mut produced = Vec::new();
        let mut writer = Writer::new(Cursor::new(&mut produced), None);
        writer.write_records(&records()?)?;
        writer.flush()?;

        assert_eq!(
            String::from_utf8(produced)?,
            ">seq1 Bacteria\nACGUACGUAC\n>seq2 Archaea;Euryarchaeota\nGGCCAAUU\n>seq3 empty\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_wrapped_layout() -> Result<()> {
        let mut produced = Vec::new();
        let mut writer = Writer::new(&mut produced, NonZeroUsize::new(4));
        writer.write_records(&records()?[..2])?;
        writer.flush()?;

        assert_eq!(
            String::from_utf8(produced)?,
            ">seq1 Bacteria\nACGU\nACGU\nAC\n>seq2 Archaea;Euryarchaeota\nGGCC\nAAUU\n"
        );
        Ok(())
    }

    #[test]
    fn test_fasta_reader_preserves_content() -> Result<()> {
        for width in [None, NonZeroUsize::new(3), NonZeroUsize::new(60)] {
            let expected = records()?;

            let mut produced = Vec::new();
            let mut writer = Writer::new(&mut produced, width);
            writer.write_records(&expected)?;
            writer.flush()?;

            let mut parsed = Vec::new();
            Reader::new(Cursor::new(&produced))?.read_to_end(&mut parsed)?;
            assert_eq!(parsed, expected);
        }
        Ok(())
    }

    #[test]
    fn test_gzip_file_roundtrip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("records.fasta.gz");
        let expected = records()?;

        let config = encode::Config::infer_from_path(&path, Deflate::FAST);
        assert_eq!(config, encode::Config::Gzip(Deflate::FAST));
        let mut writer = Writer::from_path(&path, &config, None)?;
        writer.write_records(&expected)?;
        writer.finish()?;

        let decode = decode::Config::infer_from_path(&path)?;
        assert_eq!(decode, decode::Config::Gzip);
        let mut parsed = Vec::new();
        Reader::from_path(&path, &decode)?.read_to_end(&mut parsed)?;
        assert_eq!(parsed, expected);
        Ok(())
    }
}
