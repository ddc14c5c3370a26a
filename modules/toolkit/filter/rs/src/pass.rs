use std::fmt;

use derive_getters::{Dissolve, Getters};
use eyre::{Result, WrapErr};
use log::{debug, info, warn};

use rnasieve_io_rs::compression::decode;
use rnasieve_io_rs::fasta::{Reader, Record, Writer};
use rnasieve_io_rs::{ReadRecord, WriteRecord};

use crate::config::Config;
use crate::filter::{self, Verdict};

/// Counters of a single filtering pass.
///
/// `before == after + eukaryotic + ambiguous` always holds.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Dissolve, Getters)]
pub struct Summary {
    before: u64,
    after: u64,
    eukaryotic: u64,
    ambiguous: u64,
}

impl Summary {
    fn record(&mut self, verdict: Verdict) {
        self.before += 1;
        match verdict {
            Verdict::Keep => self.after += 1,
            Verdict::Eukaryotic => self.eukaryotic += 1,
            Verdict::Ambiguous => self.ambiguous += 1,
        }
    }

    pub fn rejected(&self) -> u64 {
        self.before - self.after
    }
}

/// The console report: exactly two lines, before and after filtering.
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of seqs before filtering: {}", self.before)?;
        write!(f, "Number of seqs after filtering: {}", self.after)
    }
}

/// Stream every record from `reader`, transcribe it to RNA, and write the ones that are neither
/// eukaryotic nor ambiguous to `writer`, preserving the input order. The writer is flushed at the end.
pub fn run<R, W>(reader: &mut R, writer: &mut W) -> Result<Summary>
where
    R: ReadRecord<Record = Record> + ?Sized,
    W: WriteRecord<Record = Record> + ?Sized,
{
    let mut summary = Summary::default();
    let mut record = Record::default();

    while reader.read_record(&mut record)? {
        // SAFETY: uppercasing and T->U never introduce line terminators
        let (_, seq) = unsafe { record.raw() };
        filter::transcribe(seq);

        let verdict = filter::classify(record.description(), record.seq());
        summary.record(verdict);
        match verdict {
            Verdict::Keep => writer.write_record(&record)?,
            rejected => debug!("Dropped ({rejected}): {}", record.description()),
        }
    }
    writer.flush()?;

    Ok(summary)
}

/// Run the pass over the files described by `config`.
///
/// The output file is created up front and finalised only after the whole input was consumed.
/// On failure it is closed on drop and left with whatever was written so far.
pub fn run_files(config: &Config) -> Result<Summary> {
    config.ensure_distinct_files()?;
    let decode = match config.decode() {
        Some(decode) => *decode,
        None => decode::Config::infer_from_path(config.input()).wrap_err_with(|| {
            format!("Failed to inspect input file {}", config.input().display())
        })?,
    };
    info!("Reading {} ({decode:?})", config.input().display());
    info!(
        "Writing {} ({:?})",
        config.output().display(),
        config.encode()
    );

    let mut reader = Reader::from_path(config.input(), &decode)?;
    let mut writer = Writer::from_path(config.output(), config.encode(), *config.line_width())?;

    let summary = run(&mut reader, &mut writer)
        .wrap_err_with(|| format!("Failed to filter {}", config.input().display()))?;
    writer
        .finish()
        .wrap_err_with(|| format!("Failed to finalise {}", config.output().display()))?;

    info!(
        "Kept {} of {} records; dropped {} eukaryotic and {} ambiguous",
        summary.after, summary.before, summary.eukaryotic, summary.ambiguous
    );
    if summary.before > 0 && summary.after == 0 {
        warn!(
            "All {} records of {} were filtered out",
            summary.before,
            config.input().display()
        );
    }

    Ok(summary)
}
