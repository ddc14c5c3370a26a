use super::params;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Config {
    #[default]
    Raw, // Store raw bytes as-is
    Gzip(params::Deflate), // GZIP container
}

impl Config {
    pub const UNCOMPRESSED: Config = Config::Raw;

    /// Pick the container from the output extension, using `deflate` when it is compressed.
    pub fn infer_from_path(path: impl AsRef<Path>, deflate: params::Deflate) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| match ext {
                "gz" | "gzip" => Config::Gzip(deflate),
                _ => Config::UNCOMPRESSED,
            })
            .unwrap_or(Config::UNCOMPRESSED)
    }
}
