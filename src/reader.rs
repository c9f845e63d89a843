//! Streaming ADIF readers.
//!
//! [`RecordReader`] is the interface every reader offers: pull the next
//! record and report how many have been decoded. [`Reader`] is the base
//! implementation (header recognition, framing, field parsing);
//! [`crate::DedupReader`] wraps any `RecordReader` and drops repeats.
//!
//! ## Usage
//!
//! ```rust
//! use adif_stream::{Reader, RecordReader};
//!
//! let input: &[u8] = b"Exported by hand\n<EOH>\n\
//!     <CALL:4>W1AW<BAND:3>20m<EOR>\n\
//!     <CALL:5>K1ABC<BAND:3>40m<EOR>\n";
//!
//! let mut reader = Reader::new(input);
//! while let Some(record) = reader.read_record().unwrap() {
//!     println!("{}", record.get_str("call").unwrap());
//! }
//! assert_eq!(reader.record_count(), 2);
//! ```
//!
//! Readers are single-threaded and own their buffering state. Use one reader
//! per stream; distinct streams can be read in parallel.

use crate::framer::RecordFramer;
use crate::header::{self, Header};
use crate::source::ChunkSource;
use crate::{parser, ReaderOptions, Record, Result};
use log::debug;
use std::io::Read;

/// Something that yields ADIF records one at a time.
pub trait RecordReader {
    /// Returns the next record, `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// I/O failures and tag errors in the current record. The reader stays
    /// usable after a tag error: the next call moves on to the next record.
    fn read_record(&mut self) -> Result<Option<Record>>;

    /// Number of records successfully decoded so far.
    fn record_count(&self) -> usize;

    /// Turns the reader into an iterator of records.
    fn records(self) -> Records<Self>
    where
        Self: Sized,
    {
        Records {
            reader: self,
            done: false,
        }
    }
}

impl<T: RecordReader + ?Sized> RecordReader for &mut T {
    fn read_record(&mut self) -> Result<Option<Record>> {
        (**self).read_record()
    }

    fn record_count(&self) -> usize {
        (**self).record_count()
    }
}

impl<T: RecordReader + ?Sized> RecordReader for Box<T> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        (**self).read_record()
    }

    fn record_count(&self) -> usize {
        (**self).record_count()
    }
}

/// Base ADIF reader over any byte stream.
pub struct Reader<R> {
    source: ChunkSource<R>,
    options: ReaderOptions,
    header: Option<Header>,
    framer: RecordFramer,
    records: usize,
}

impl<R: Read> Reader<R> {
    /// Creates a reader with default [`ReaderOptions`].
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ReaderOptions::default())
    }

    pub fn with_options(reader: R, options: ReaderOptions) -> Self {
        Reader {
            source: ChunkSource::new(reader, options.chunk_size),
            framer: RecordFramer::new(Vec::new(), options.stop_at_sentinel),
            options,
            header: None,
            records: 0,
        }
    }

    /// The recognised header, once the first record has been requested.
    #[must_use]
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Declared ADIF version, or the configured default.
    #[must_use]
    pub fn version(&self) -> &str {
        self.header
            .as_ref()
            .and_then(|h| h.version.as_deref())
            .unwrap_or(&self.options.default_version)
    }

    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Gives back the underlying stream; buffered bytes are lost.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }

    fn read_header(&mut self) -> Result<()> {
        let recognized = header::recognize(&mut self.source)?;
        debug!(
            "header done, version {:?}, {} bytes carried into the first record",
            recognized.header.version,
            recognized.excess.len()
        );
        self.framer = RecordFramer::new(recognized.excess, self.options.stop_at_sentinel);
        self.header = Some(recognized.header);
        Ok(())
    }
}

impl<R: Read> RecordReader for Reader<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        if self.header.is_none() {
            self.read_header()?;
        }
        let Some(span) = self.framer.next_span(&mut self.source)? else {
            return Ok(None);
        };
        let record = parser::parse_record(&span)?;
        self.records += 1;
        Ok(Some(record))
    }

    fn record_count(&self) -> usize {
        self.records
    }
}

/// Iterator over a reader's records, see [`RecordReader::records`].
///
/// Yields each error once and keeps going, so a caller can skip a bad record.
/// I/O errors end the iteration after being yielded.
pub struct Records<T> {
    reader: T,
    done: bool,
}

impl<T> Records<T> {
    pub fn into_inner(self) -> T {
        self.reader
    }

    pub fn get_ref(&self) -> &T {
        &self.reader
    }
}

impl<T: RecordReader> Iterator for Records<T> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                if !e.is_tag_error() {
                    self.done = true;
                }
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_reads_records_without_header() {
        let mut reader = Reader::new(&b"<mycall:6>KF4MDV<eor><mycall:6>KG4JEL<eor>"[..]);
        let first = reader.read_record().unwrap().unwrap();
        assert_eq!(first.get("mycall").unwrap(), b"KF4MDV");
        let second = reader.read_record().unwrap().unwrap();
        assert_eq!(second.get("mycall").unwrap(), b"KG4JEL");
        assert!(reader.read_record().unwrap().is_none());
        assert!(reader.read_record().unwrap().is_none());
        assert_eq!(reader.record_count(), 2);
        assert_eq!(reader.version(), "2");
    }

    #[test]
    fn test_version_from_header() {
        let mut reader = Reader::new(&b"<adif_ver:5>3.1.4<eoh>\n<call:4>W1AW<eor>"[..]);
        assert_eq!(reader.version(), "2");
        assert!(reader.read_record().unwrap().is_some());
        assert_eq!(reader.version(), "3.1.4");
        assert_eq!(reader.header().unwrap().version.as_deref(), Some("3.1.4"));
    }

    #[test]
    fn test_default_version_is_configurable() {
        let options = ReaderOptions::new().with_default_version("3.0.0");
        let mut reader = Reader::with_options(&b"<call:4>W1AW<eor>"[..], options);
        reader.read_record().unwrap();
        assert_eq!(reader.version(), "3.0.0");
    }

    #[test]
    fn test_bad_version_length_surfaces() {
        let mut reader = Reader::new(&b"<adif_ver:?>3<eoh><call:4>W1AW<eor>"[..]);
        assert!(matches!(
            reader.read_record(),
            Err(Error::InvalidVersionLength(_))
        ));
    }

    #[test]
    fn test_reader_recovers_after_bad_record() {
        let input = b"<call:4>W1AW<eor><call:x>BAD<eor><call:5>K1ABC<eor>";
        let mut reader = Reader::new(&input[..]);
        assert!(reader.read_record().unwrap().is_some());
        assert!(reader.read_record().unwrap_err().is_tag_error());
        let third = reader.read_record().unwrap().unwrap();
        assert_eq!(third.get("call").unwrap(), b"K1ABC");
        assert_eq!(reader.record_count(), 2);
    }

    #[test]
    fn test_records_iterator() {
        let input = b"<call:4>W1AW<eor><call:x>BAD<eor><call:5>K1ABC<eor>";
        let results: Vec<_> = Reader::new(&input[..]).records().collect();
        assert_eq!(results.len(), 3);
        assert!(results[1].is_err());
    }

    #[test]
    fn test_io_error_ends_iteration() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "gone"))
            }
        }
        // peek and header failures are swallowed; framing reports the error
        let mut records = Reader::new(Failing).records();
        assert!(matches!(records.next(), Some(Err(Error::Io(_)))));
        assert!(records.next().is_none());
    }

    #[test]
    fn test_boxed_reader() {
        let mut reader: Box<dyn RecordReader> = Box::new(Reader::new(&b"<a:1>x<eor>"[..]));
        assert!(reader.read_record().unwrap().is_some());
        assert_eq!(reader.record_count(), 1);
    }
}
