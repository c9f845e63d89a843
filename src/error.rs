//! Error types for ADIF reading and record manipulation.
//!
//! ## Error Categories
//!
//! - **Tag Errors**: A tag inside a record could not be decoded (bad brackets,
//!   bad length, oversized type code, stray colons, a value cut short, a name
//!   that is not UTF-8)
//! - **Lookup Errors**: A field was requested or deleted that the record does not hold
//! - **Header Errors**: The header declared a version with an unreadable length
//! - **I/O Errors**: The underlying byte source failed
//!
//! End of input is not an error. Readers report it as `Ok(None)`.
//!
//! ## Examples
//!
//! ```rust
//! use adif_stream::{Error, Record};
//!
//! let result = Record::parse(b"<call:x>W1AW");
//! assert!(matches!(result, Err(Error::InvalidFieldLength { .. })));
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors raised while reading or editing ADIF records.
///
/// Tag-level variants carry the byte offset inside the record span where
/// decoding stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The underlying byte source failed with something other than end of input.
    #[error("IO error: {0}")]
    Io(String),

    /// Colon and bracket ordering inside a tag is inconsistent.
    #[error("Malformed tag at offset {offset}: {msg}")]
    MalformedTag { offset: usize, msg: String },

    /// The declared length of a field is missing or not a decimal number.
    #[error("Invalid field length for <{name}> at offset {offset}: {found:?}")]
    InvalidFieldLength {
        name: String,
        offset: usize,
        found: String,
    },

    /// More than one byte sits between the second colon and the closing bracket.
    #[error("Type code of <{name}> at offset {offset} exceeds one byte")]
    TypeCodeTooLong { name: String, offset: usize },

    /// The declared length runs past the end of the record.
    #[error("Value of <{name}> at offset {offset} declares {declared} bytes but only {available} remain")]
    TruncatedValue {
        name: String,
        offset: usize,
        declared: usize,
        available: usize,
    },

    /// A field name is not valid UTF-8.
    #[error("Field name at offset {offset} is not valid UTF-8: {name:?}")]
    InvalidFieldName { name: String, offset: usize },

    /// A tag holds more than two colons.
    #[error("Unexpected colon in <{name}> at offset {offset}")]
    UnexpectedColon { name: String, offset: usize },

    /// Lookup or deletion of a field the record does not contain.
    #[error("No such field: {0}")]
    NoSuchField(String),

    /// An empty record span was handed to the parser.
    #[error("No data to parse")]
    NoData,

    /// The header's `adif_ver` tag declares a length that cannot be decoded.
    #[error("Invalid length in ADIF version header: {0:?}")]
    InvalidVersionLength(String),

    /// Custom error, mostly from serde integration.
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an I/O error from anything displayable.
    pub fn io<T: fmt::Display>(err: T) -> Self {
        Error::Io(err.to_string())
    }

    /// Creates a malformed tag error at `offset`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adif_stream::Error;
    ///
    /// let err = Error::malformed_tag(4, "missing '>'");
    /// assert!(err.to_string().contains("offset 4"));
    /// ```
    pub fn malformed_tag(offset: usize, msg: &str) -> Self {
        Error::MalformedTag {
            offset,
            msg: msg.to_string(),
        }
    }

    pub fn invalid_field_length(name: &[u8], offset: usize, found: &[u8]) -> Self {
        Error::InvalidFieldLength {
            name: String::from_utf8_lossy(name).into_owned(),
            offset,
            found: String::from_utf8_lossy(found).into_owned(),
        }
    }

    pub fn type_code_too_long(name: &[u8], offset: usize) -> Self {
        Error::TypeCodeTooLong {
            name: String::from_utf8_lossy(name).into_owned(),
            offset,
        }
    }

    pub fn truncated_value(name: &[u8], offset: usize, declared: usize, available: usize) -> Self {
        Error::TruncatedValue {
            name: String::from_utf8_lossy(name).into_owned(),
            offset,
            declared,
            available,
        }
    }

    pub fn invalid_field_name(name: &[u8], offset: usize) -> Self {
        Error::InvalidFieldName {
            name: String::from_utf8_lossy(name).into_owned(),
            offset,
        }
    }

    pub fn unexpected_colon(name: &[u8], offset: usize) -> Self {
        Error::UnexpectedColon {
            name: String::from_utf8_lossy(name).into_owned(),
            offset,
        }
    }

    /// Creates a lookup miss for `name`.
    pub fn no_such_field(name: &str) -> Self {
        Error::NoSuchField(name.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for errors raised while decoding a tag.
    ///
    /// Readers keep their position after such errors, so a caller may skip the
    /// offending record and keep reading.
    #[must_use]
    pub fn is_tag_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedTag { .. }
                | Error::InvalidFieldLength { .. }
                | Error::TypeCodeTooLong { .. }
                | Error::TruncatedValue { .. }
                | Error::InvalidFieldName { .. }
                | Error::UnexpectedColon { .. }
        )
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err)
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_error_classification() {
        assert!(Error::malformed_tag(0, "x").is_tag_error());
        assert!(Error::invalid_field_length(b"call", 0, b"x").is_tag_error());
        assert!(Error::truncated_value(b"notes", 0, 10, 5).is_tag_error());
        assert!(Error::invalid_field_name(b"n\xe9", 0).is_tag_error());
        assert!(!Error::NoData.is_tag_error());
        assert!(!Error::no_such_field("call").is_tag_error());
    }

    #[test]
    fn test_io_conversion_keeps_message() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert_eq!(err, Error::Io("pipe closed".to_string()));
    }

    #[test]
    fn test_lossy_names_in_messages() {
        let err = Error::type_code_too_long(b"n\xffme", 3);
        assert!(err.to_string().contains("n\u{fffd}me"));
    }
}
