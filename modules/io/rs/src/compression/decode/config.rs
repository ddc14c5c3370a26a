use eyre::Result;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Config {
    #[default]
    Raw, // Uncompressed bytes as-is
    Gzip, // GZIP container, possibly multi-member (covers BGZF as well)
}

impl Config {
    /// Detect the compression from the file signature, falling back to the extension when the
    /// signature is unknown (e.g. empty or truncated files).
    pub fn infer_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(kind) = infer::get_from_path(path)? {
            if kind.mime_type() == "application/gzip" {
                return Ok(Config::Gzip);
            }
        }
        Ok(Self::infer_from_extension(path))
    }

    pub fn infer_from_extension(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| match ext {
                "gz" | "gzip" | "bgz" | "bgzf" => Config::Gzip,
                _ => Config::Raw,
            })
            .unwrap_or(Config::Raw)
    }
}
