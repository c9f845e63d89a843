//! # adif_stream
//!
//! A streaming reader, canonical serializer and deduplicator for ADIF, the
//! Amateur Data Interchange Format used to exchange radio contact logs.
//!
//! ## What is ADIF?
//!
//! An ADIF file is an optional header followed by records. Every field is a
//! length-prefixed tag, `<name:length>value`, and every record ends with
//! `<eor>`:
//!
//! ```text
//! Exported by some logger
//! <adif_ver:5>3.1.4
//! <eoh>
//! <call:4>W1AW <band:3>20m <mode:2>CW <qso_date:8>20240102 <time_on:4>1830 <eor>
//! ```
//!
//! ## Key Features
//!
//! - **Streaming**: Reads any [`std::io::Read`] in fixed-size chunks
//! - **Tolerant**: Free-text headers, vendor filler between tags, comments,
//!   mixed-case markers and the LoTW `<app_lotw_eof>` trailer are all handled
//! - **Byte exact**: Values keep their declared byte length and content, even
//!   when they hold `<`, `>` or invalid UTF-8
//! - **Deterministic output**: Canonical serialization ignores insertion order
//! - **Deduplication**: SHA-256 fingerprints over the contact's identity fields
//!
//! ## Quick Start
//!
//! ```rust
//! use adif_stream::{DedupReader, Reader, RecordReader};
//!
//! let log: &[u8] = b"<call:4>W1AW<band:3>20m<eor>\n\
//!                    <call:4>W1AW<band:3>20m<notes:5>again<eor>\n";
//!
//! let mut reader = DedupReader::new(Reader::new(log));
//! while let Some(record) = reader.read_record().unwrap() {
//!     assert_eq!(record.to_text(), "<band:3>20m<call:4>W1AW");
//! }
//! assert_eq!(reader.record_count(), 2);
//! ```
//!
//! ### Building Records
//!
//! ```rust
//! use adif_stream::Record;
//!
//! let mut record = Record::new();
//! record.set("CALL", "K1ABC");
//! record.set("qso_date", "20240102");
//!
//! let text = record.to_text();
//! assert_eq!(Record::parse(text.as_bytes()).unwrap(), record);
//! ```
//!
//! ## Threading
//!
//! Readers are plain single-threaded state machines with blocking reads. Use
//! one reader per stream.

pub mod dedup;
pub mod error;
pub mod fields;
pub mod framer;
pub mod header;
pub mod map;
pub mod options;
pub mod parser;
pub mod reader;
pub mod record;
pub mod scan;
pub mod source;
pub mod tag;

pub use dedup::DedupReader;
pub use error::{Error, Result};
pub use header::Header;
pub use map::FieldMap;
pub use options::ReaderOptions;
pub use parser::parse_record;
pub use reader::{Reader, RecordReader, Records};
pub use record::Record;
pub use tag::{Tag, TagTokenizer};

use std::io;

/// Reads every record from `reader`.
///
/// # Examples
///
/// ```rust
/// let records = adif_stream::from_reader(&b"<call:4>W1AW<eor>"[..]).unwrap();
/// assert_eq!(records.len(), 1);
/// ```
///
/// # Errors
///
/// Stops at the first error, see [`RecordReader::read_record`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(reader: R) -> Result<Vec<Record>> {
    Reader::new(reader).records().collect()
}

/// Reads every record from an in-memory ADIF document.
///
/// # Errors
///
/// Stops at the first error, see [`RecordReader::read_record`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(bytes: &[u8]) -> Result<Vec<Record>> {
    from_reader(bytes)
}

/// Writes records in canonical form, one per line.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn to_writer<W: io::Write>(mut writer: W, records: &[Record]) -> Result<()> {
    for record in records {
        record.write_to(&mut writer)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Renders records in canonical form, one per line.
///
/// # Examples
///
/// ```rust
/// use adif_stream::Record;
///
/// let mut record = Record::new();
/// record.set("call", "W1AW");
/// assert_eq!(adif_stream::to_string(&[record]), "<call:4>W1AW\n");
/// ```
#[must_use]
pub fn to_string(records: &[Record]) -> String {
    records.iter().map(|r| r.to_text() + "\n").collect()
}
