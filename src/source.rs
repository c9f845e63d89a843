//! Chunked byte source.
//!
//! [`ChunkSource`] wraps any [`Read`] and hands out chunks of at most
//! `chunk_size` bytes. End of input is reported as `Ok(None)` and stays
//! reported on every later call; there is no seeking or rewinding.

use log::trace;
use std::io::{self, BufRead, BufReader, Read};

pub struct ChunkSource<R> {
    inner: BufReader<R>,
    chunk_size: usize,
    exhausted: bool,
}

impl<R: Read> ChunkSource<R> {
    pub fn new(reader: R, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        ChunkSource {
            inner: BufReader::with_capacity(chunk_size.max(8 * 1024), reader),
            chunk_size,
            exhausted: false,
        }
    }

    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Looks at the next byte without consuming it.
    pub fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        if self.exhausted {
            return Ok(None);
        }
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Reads the next non-empty chunk, or `None` once input has ended.
    pub fn next_chunk(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.exhausted {
            return Ok(None);
        }
        let mut chunk = vec![0u8; self.chunk_size];
        loop {
            match self.inner.read(&mut chunk) {
                Ok(0) => {
                    trace!("byte source exhausted");
                    self.exhausted = true;
                    return Ok(None);
                }
                Ok(n) => {
                    chunk.truncate(n);
                    return Ok(Some(chunk));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_respect_size() {
        let mut source = ChunkSource::new(&b"abcdefg"[..], 3);
        assert_eq!(source.next_chunk().unwrap(), Some(b"abc".to_vec()));
        assert_eq!(source.next_chunk().unwrap(), Some(b"def".to_vec()));
        assert_eq!(source.next_chunk().unwrap(), Some(b"g".to_vec()));
        assert_eq!(source.next_chunk().unwrap(), None);
    }

    #[test]
    fn test_zero_chunk_size_is_raised() {
        let mut source = ChunkSource::new(&b"ab"[..], 0);
        assert_eq!(source.chunk_size(), 1);
        assert_eq!(source.next_chunk().unwrap(), Some(b"a".to_vec()));
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let mut source = ChunkSource::new(&b""[..], 16);
        assert_eq!(source.next_chunk().unwrap(), None);
        assert!(source.is_exhausted());
        assert_eq!(source.next_chunk().unwrap(), None);
        assert_eq!(source.peek_byte().unwrap(), None);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut source = ChunkSource::new(&b"<a"[..], 16);
        assert_eq!(source.peek_byte().unwrap(), Some(b'<'));
        assert_eq!(source.next_chunk().unwrap(), Some(b"<a".to_vec()));
    }

    #[test]
    fn test_errors_propagate() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "boom"))
            }
        }
        let mut source = ChunkSource::new(Failing, 4);
        assert!(source.next_chunk().is_err());
        assert!(!source.is_exhausted());
    }
}
