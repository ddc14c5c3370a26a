use super::config::Config;
use eyre::Result;
use flate2::read::MultiGzDecoder;
use std::io::Read;

pub enum Stream<R: Read> {
    Raw(R),
    Gzip(MultiGzDecoder<R>),
}

impl<R: Read> Stream<R> {
    pub fn new(inner: R, config: &Config) -> Result<Self> {
        match config {
            Config::Raw => Ok(Stream::Raw(inner)),
            Config::Gzip => Ok(Stream::Gzip(MultiGzDecoder::new(inner))),
        }
    }
}

impl<R: Read> Read for Stream<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Stream::Raw(r) => r.read(buf),
            Stream::Gzip(r) => r.read(buf),
        }
    }
}
