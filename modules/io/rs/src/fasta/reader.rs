use super::{record::Record, validate};
use crate::compression::decode;
use crate::traits::ReadRecord;
use derive_getters::Dissolve;
use eyre::{ensure, Result, WrapErr};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A FASTA reader that parses a single record at a time. Ignores:
/// - Blank lines before the first record
/// - Carriage return and space characters inside sequence lines, and empty sequence lines
/// - Trailing whitespace of every description and sequence line
///
/// Any other symbol, including tabs inside a line and non-ASCII bytes, is kept in the sequence
/// as-is. The description may be empty.
///
/// Returns an error if there are:
/// - Errors while reading from the underlying reader, including non-UTF-8 description lines
/// - Text before the first record (sequence data without a preceding description)
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Dissolve)]
pub struct Reader<R> {
    reader: R,
    parsed: usize,
}

impl Reader<()> {
    /// Create a new FASTA reader from the given file path. The stream is decompressed according to
    /// the given configuration; see [decode::Config::infer_from_path] for auto-detection.
    pub fn from_path(
        path: impl AsRef<Path>,
        decode: &decode::Config,
    ) -> Result<Reader<BufReader<decode::Stream<File>>>> {
        let path = path.as_ref();
        let file = File::open(path)
            .wrap_err_with(|| format!("Failed to open FASTA file {}", path.display()))?;
        Reader::new(BufReader::new(decode::Stream::new(file, decode)?))
            .wrap_err_with(|| format!("Failed to read FASTA file {}", path.display()))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        // Skip blank lines, but nothing else, before the first record
        let mut line_start = true;
        loop {
            let Some(&first) = reader.fill_buf()?.first() else {
                break;
            };
            if line_start && first == b'>' {
                break;
            }
            ensure!(
                first.is_ascii_whitespace(),
                "Expected '>' at the start of the FASTA file"
            );
            line_start = first == b'\n';
            reader.consume(1);
        }
        Ok(Self { reader, parsed: 0 })
    }

    /// Number of records successfully parsed so far.
    pub fn parsed(&self) -> usize {
        self.parsed
    }

    #[inline(always)]
    fn read_parts(&mut self, record: &mut Record) -> Result<bool> {
        // Ensure that the next symbol is '>' and consume it
        let buffer = self.reader.fill_buf()?;
        if buffer.is_empty() {
            return Ok(false);
        }
        ensure!(
            buffer[0] == b'>',
            "Expected '>' at the start of the FASTA record"
        );
        self.reader.consume(1);

        // SAFETY: both fields are validated below before the record is handed back
        let (description, seq) = unsafe { record.raw() };

        // Read and validate the description line. The last record may end without a newline.
        description.clear();
        self.reader.read_line(description)?;
        let trimmed = description.trim_end().len();
        description.truncate(trimmed);
        validate::description(description)?;

        // Read and validate the sequence lines
        seq.clear();
        let mut line_start = true;
        let mut line_begin = 0;
        loop {
            let buffer = self.reader.fill_buf()?;
            if buffer.is_empty() {
                break;
            }

            // A '>' at the start of a line opens the next record
            if line_start && buffer[0] == b'>' {
                break;
            }

            // The buffer may end in the middle of a line, in which case the line continues in
            // the next buffer and a '>' there is a sequence symbol, not a header.
            let (chunk, consume, ends_line) = match memchr::memchr(b'\n', buffer) {
                Some(pos) => (&buffer[..pos], pos + 1, true),
                None => (buffer, buffer.len(), false),
            };
            seq.extend(chunk.iter().copied().filter(|x| *x != b' ' && *x != b'\r'));

            self.reader.consume(consume);
            if ends_line {
                trim_line_end(seq, line_begin);
                line_begin = seq.len();
            }
            line_start = ends_line;
        }
        // The last line may end at EOF without a newline
        trim_line_end(seq, line_begin);
        validate::seq(seq).wrap_err_with(|| format!("Invalid sequence for {description}"))?;

        Ok(true)
    }
}

/// Drop trailing whitespace of the sequence line that starts at `line_begin`.
fn trim_line_end(seq: &mut Vec<u8>, line_begin: usize) {
    let end = seq[line_begin..]
        .iter()
        .rposition(|x| !x.is_ascii_whitespace())
        .map_or(line_begin, |pos| line_begin + pos + 1);
    seq.truncate(end);
}

impl<R: BufRead> ReadRecord for Reader<R> {
    type Record = Record;

    /// Parse the next FASTA record into the given [Record] buffer.
    /// Returns `false` if there are no more records to read.
    ///
    /// On error the buffer is left in an unspecified state, but can be reused for the next read.
    fn read_record(&mut self, buf: &mut Self::Record) -> Result<bool> {
        let read = self
            .read_parts(buf)
            .wrap_err_with(|| format!("Failed to parse FASTA record #{}", self.parsed + 1))?;
        if read {
            self.parsed += 1;
        }
        Ok(read)
    }

    fn read_records(&mut self, bufs: &mut [Self::Record]) -> Result<usize> {
        let mut n = 0;
        for buf in bufs {
            if self.read_record(buf)? {
                n += 1;
            } else {
                break;
            }
        }
        Ok(n)
    }

    /// Read the remaining records in the file and place them into the given vector.
    /// Returns the number of records read.
    ///
    /// Records already present in the vector are overwritten first, then new ones are appended.
    fn read_to_end(&mut self, into: &mut Vec<Self::Record>) -> Result<usize> {
        let mut total = 0;

        // Read into the existing buffer
        for record in into.iter_mut() {
            if !self.read_record(record)? {
                return Ok(total);
            }
            total += 1;
        }

        // Append to the buffer
        loop {
            let mut record = Record::default();
            if !self.read_record(&mut record)? {
                return Ok(total);
            }
            into.push(record);
            total += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::Report;
    use std::io::{Cursor, Read};

    fn test_read_record(content: impl Read, expected: &[(&str, &str)]) -> Result<()> {
        // Record-by-record reading
        let mut reader = Reader::new(BufReader::new(content))?;
        let mut record = Record::default();
        for (description, seq) in expected {
            assert!(reader.read_record(&mut record)?);
            assert_eq!(record, (*description, *seq).try_into()?);
        }
        assert!(!reader.read_record(&mut record)?);
        assert_eq!(reader.parsed(), expected.len());

        Ok(())
    }

    fn test_read_to_end(content: impl Read, expected: &[(&str, &str)]) -> Result<()> {
        // Read all records at once
        let mut reader = Reader::new(BufReader::new(content))?;
        let mut records = Vec::new();
        reader.read_to_end(&mut records)?;
        assert_eq!(records.len(), expected.len());
        for (record, (description, seq)) in records.iter().zip(expected.iter()) {
            assert_eq!(*record, (*description, *seq).try_into()?);
        }

        Ok(())
    }

    #[test]
    fn test_empty_fasta_reader() -> Result<()> {
        test_read_record(&[0u8; 0][..], &[])?;
        test_read_to_end(&[0u8; 0][..], &[])?;
        Ok(())
    }

    #[test]
    fn test_invalid_fasta() {
        for content in [
            "ACGT\n>id\nACGT\n",
            "\n\nACGT\n>id\nACGT\n",
            "  >id\nACGT\n",
            "x",
        ] {
            // Per record
            let result = Reader::new(Cursor::new(content)).and_then(|mut x| {
                let mut record = Record::default();
                while x.read_record(&mut record)? {}
                Ok::<(), Report>(())
            });

            assert!(result.is_err(), "Content: {:?}", content);

            // All records
            let result = Reader::new(Cursor::new(content)).and_then(|mut x| {
                let mut records = Vec::new();
                x.read_to_end(&mut records)?;
                Ok::<(), Report>(())
            });

            assert!(result.is_err(), "Content: {:?}", content);
        }
    }

    #[test]
    fn test_valid_fasta() {
        for (content, records) in [
            ("", vec![]),
            (" \n\t\r\n", vec![]),
            (">id\nACGT\n", vec![("id", "ACGT")]),
            ("\n\n>id\nACGT\n", vec![("id", "ACGT")]),
            (" \t\r\n>id\nACGT\n", vec![("id", "ACGT")]),
            (">id\n\nACGT\n\n", vec![("id", "ACGT")]),
            (">id", vec![("id", "")]),
            (">id\n", vec![("id", "")]),
            (">", vec![("", "")]),
            (">\nACGT\n", vec![("", "ACGT")]),
            (">   \nACGT\n", vec![("", "ACGT")]),
            (">id\nACGT", vec![("id", "ACGT")]),
            (">id\nAC GT \n", vec![("id", "ACGT")]),
            (">id\nACGT\t\n", vec![("id", "ACGT")]),
            (">id\nACGT \t \r\nGG\t", vec![("id", "ACGTGG")]),
            (">id\nAC\tGT\n", vec![("id", "AC\tGT")]),
            (">id\n\tACGT\n", vec![("id", "\tACGT")]),
            (">id\nACGTÜ\n", vec![("id", "ACGTÜ")]),
            (">id  \t\nacgn\n", vec![("id", "acgn")]),
            (">id\nAC>GT\n", vec![("id", "AC>GT")]),
            (
                ">id\nACGT\n>id2\nACGT\n",
                vec![("id", "ACGT"), ("id2", "ACGT")],
            ),
            (
                ">id\n>id2\nACGT\n",
                vec![("id", ""), ("id2", "ACGT")],
            ),
            (
                ">id\nACGT\n>id2\nAC\n>id3\r\nGT\r\n>id4\r\nT\r\n",
                vec![("id", "ACGT"), ("id2", "AC"), ("id3", "GT"), ("id4", "T")],
            ),
            (
                ">ID\r\nACGT\r\nA\r\nGTTT\r\nA\r\n>id2\nAC\n",
                vec![("ID", "ACGTAGTTTA"), ("id2", "AC")],
            ),
            (
                ">AB001.1.1500 Bacteria;Firmicutes;Bacilli\nacgu\n>AB002.1.1400 Eukaryota;Fungi\nNNNN\n",
                vec![
                    ("AB001.1.1500 Bacteria;Firmicutes;Bacilli", "acgu"),
                    ("AB002.1.1400 Eukaryota;Fungi", "NNNN"),
                ],
            ),
        ] {
            assert!(
                test_read_record(content.as_bytes(), &records).is_ok(),
                "Content: {:?}",
                content
            );
            assert!(
                test_read_to_end(content.as_bytes(), &records).is_ok(),
                "Content: {:?}",
                content
            );
        }
    }

    #[test]
    fn test_read_records_in_batches() -> Result<()> {
        let content = ">r1\nACGT\n>r2\nGGCC\n>r3\nUUAA\n";
        let mut reader = Reader::new(Cursor::new(content))?;
        let mut batch = vec![Record::default(); 2];

        assert_eq!(reader.read_records(&mut batch)?, 2);
        assert_eq!(batch[0], ("r1", "ACGT").try_into()?);
        assert_eq!(batch[1], ("r2", "GGCC").try_into()?);

        assert_eq!(reader.read_records(&mut batch)?, 1);
        assert_eq!(batch[0], ("r3", "UUAA").try_into()?);

        assert_eq!(reader.read_records(&mut batch)?, 0);
        assert_eq!(reader.read_records(&mut batch[..0])?, 0);
        assert_eq!(reader.parsed(), 3);
        Ok(())
    }

    #[test]
    fn test_lines_split_across_buffers() -> Result<()> {
        // A tiny buffer forces every line to span several fill_buf calls
        let content = ">first record\nACGT>ACGT \t\t \nAAAA\n>second\nCCCC\r\nGG\t\t\t\t";
        let mut reader = Reader::new(BufReader::with_capacity(3, content.as_bytes()))?;
        let mut records = Vec::new();
        reader.read_to_end(&mut records)?;

        let expected: Vec<Record> = vec![
            ("first record", "ACGT>ACGTAAAA").try_into()?,
            ("second", "CCCCGG").try_into()?,
        ];
        assert_eq!(records, expected);
        Ok(())
    }

    #[test]
    fn test_error_names_the_record() {
        let content: &[u8] = b">ok\nACGT\n>bro\xffken\nACGT\n";
        let mut reader = Reader::new(Cursor::new(content)).unwrap();
        let mut record = Record::default();
        assert!(reader.read_record(&mut record).unwrap());

        let err = reader.read_record(&mut record).unwrap_err();
        assert!(format!("{err:#}").contains("record #2"), "Error: {err:#}");
    }
}
