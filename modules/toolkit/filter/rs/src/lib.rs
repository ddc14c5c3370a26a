pub use config::Config;
pub use filter::Verdict;
pub use pass::{run, run_files, Summary};

pub mod config;
pub mod filter;
mod pass;
