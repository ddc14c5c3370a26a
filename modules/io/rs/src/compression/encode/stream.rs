use super::config::Config;
use eyre::Result;
use flate2::write::GzEncoder;
use std::io::Write;

pub enum Stream<W: Write> {
    Raw(W),
    Gzip(GzEncoder<W>),
}

impl<W: Write> Stream<W> {
    pub fn new(inner: W, config: &Config) -> Result<Self> {
        match config {
            Config::Raw => Ok(Stream::Raw(inner)),
            Config::Gzip(params) => {
                let encoder =
                    GzEncoder::new(inner, flate2::Compression::new(*params.level() as u32));
                Ok(Stream::Gzip(encoder))
            }
        }
    }

    /// Flush everything and write the container trailer (if any), returning the inner writer.
    /// Dropping the stream also finalises it, but silently discards any error.
    pub fn finish(self) -> Result<W> {
        match self {
            Stream::Raw(mut w) => {
                w.flush()?;
                Ok(w)
            }
            Stream::Gzip(encoder) => {
                let mut w = encoder.finish()?;
                w.flush()?;
                Ok(w)
            }
        }
    }
}

impl<W: Write> Write for Stream<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Stream::Raw(w) => w.write(buf),
            Stream::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Stream::Raw(w) => w.flush(),
            Stream::Gzip(w) => w.flush(),
        }
    }
}
