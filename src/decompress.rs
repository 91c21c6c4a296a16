//! Helper module to tell gzip failures apart from tar failures
//!
//! The tar reader pulls bytes through the decoder and reports whatever
//! goes wrong as a plain `io::Error`, so we note when the decoder itself
//! was the one that failed.

use std::io;
use std::io::prelude::*;

use flate2::read::MultiGzDecoder;
use log::*;

/// Reader that decompresses a gzip stream and remembers decoder errors.
///
/// Concatenated gzip members are read back to back, as `gzip -d` would.
pub struct GzipReader<R> {
    inner: MultiGzDecoder<R>,
    decompressed: u64,
    failed: bool,
}

impl<R: Read> GzipReader<R> {
    pub fn new(inner: R) -> GzipReader<R> {
        GzipReader {
            inner: MultiGzDecoder::new(inner),
            decompressed: 0,
            failed: false,
        }
    }
}

impl<R> GzipReader<R> {
    /// Returns true if the gzip decoder returned an error at any point
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Bytes handed out so far
    pub fn decompressed(&self) -> u64 {
        self.decompressed
    }
}

impl<R: Read> Read for GzipReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf) {
            Ok(n) => {
                self.decompressed += n as u64;
                Ok(n)
            }
            Err(e) => {
                debug!(
                    "gzip decoder failed after {} bytes: {}",
                    self.decompressed, e
                );
                self.failed = true;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_round_trip() {
        let compressed = gzip(b"1234");
        let mut reader = GzipReader::new(&compressed[..]);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"1234");
        assert_eq!(reader.decompressed(), 4);
        assert!(!reader.failed());
    }

    #[test]
    fn test_concatenated_members() {
        let mut compressed = gzip(b"12");
        compressed.extend(gzip(b"34"));
        let mut reader = GzipReader::new(&compressed[..]);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"1234");
        assert!(!reader.failed());
    }

    #[test]
    fn test_not_gzip() {
        let data: &[u8] = b"this is not a gzip stream at all";
        let mut reader = GzipReader::new(data);
        let mut out = Vec::new();
        assert!(reader.read_to_end(&mut out).is_err());
        assert!(reader.failed());
    }

    #[test]
    fn test_truncated() {
        let data = vec![7u8; 4096];
        let compressed = gzip(&data);
        let mut reader = GzipReader::new(&compressed[..compressed.len() / 2]);
        let mut out = Vec::new();
        assert!(reader.read_to_end(&mut out).is_err());
        assert!(reader.failed());
    }
}
