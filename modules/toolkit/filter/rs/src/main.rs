use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use eyre::Result;

use rnasieve_filter_rs::config::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use rnasieve_filter_rs::Config;

/// Drop eukaryotic and ambiguous records from a SILVA FASTA file and transcribe the rest to RNA.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input FASTA file, optionally gzip-compressed
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output FASTA file; a .gz extension enables gzip compression
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Wrap output sequences at this many columns instead of writing them on one line
    #[arg(long)]
    line_width: Option<NonZeroUsize>,

    /// DEFLATE level for gzip-compressed output
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(0..=9))]
    compression_level: u8,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::new(&args.input, &args.output)?
        .with_compression_level(args.compression_level)?
        .with_line_width(args.line_width);
    let summary = rnasieve_filter_rs::run_files(&config)?;

    println!("{summary}");
    Ok(())
}
