//! Duplicate suppression.
//!
//! [`DedupReader`] wraps any [`RecordReader`] and only passes on records
//! whose [`Record::fingerprint`] it has not seen before in this stream.
//!
//! ```rust
//! use adif_stream::{DedupReader, Reader, RecordReader};
//!
//! let input: &[u8] = b"<mycall:6>KF4MDV<eor><mycall:6>KF4MDV<fail:1>Y<eor>";
//! let mut reader = DedupReader::new(Reader::new(input));
//!
//! assert!(reader.read_record().unwrap().is_some());
//! assert!(reader.read_record().unwrap().is_none());
//! ```

use crate::{Record, RecordReader, Result};
use log::trace;
use std::collections::HashSet;

/// A reader that drops records already seen, judged by fingerprint.
///
/// The fingerprint set lives as long as the reader. Errors and end of input
/// from the wrapped reader are passed through untouched.
pub struct DedupReader<T> {
    inner: T,
    seen: HashSet<String>,
    duplicates: usize,
}

impl<T: RecordReader> DedupReader<T> {
    pub fn new(inner: T) -> Self {
        DedupReader {
            inner,
            seen: HashSet::new(),
            duplicates: 0,
        }
    }

    /// Number of records dropped as duplicates so far.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Number of distinct records passed on so far.
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: RecordReader> RecordReader for DedupReader<T> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        while let Some(record) = self.inner.read_record()? {
            let fingerprint = record.fingerprint();
            if self.seen.insert(fingerprint) {
                return Ok(Some(record));
            }
            trace!("dropping duplicate record");
            self.duplicates += 1;
        }
        Ok(None)
    }

    /// Records decoded by the wrapped reader, duplicates included.
    fn record_count(&self) -> usize {
        self.inner.record_count()
    }
}
