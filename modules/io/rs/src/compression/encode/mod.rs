mod config;
pub mod params;
mod stream;

pub use config::Config;
pub use stream::Stream;
