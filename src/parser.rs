//! Record field parser.
//!
//! Turns one record span (the bytes between two `<eor>` markers) into a
//! [`Record`]. Each field is `<name:length[:type]>` followed by exactly
//! `length` value bytes. Anything between fields that is not a tag is
//! skipped, and `//` starts a comment that runs to the end of the line.
//!
//! ```rust
//! use adif_stream::parse_record;
//!
//! let record = parse_record(b"// logged by hand\n<CALL:4>W1AW <Band:3>20m").unwrap();
//! assert_eq!(record.get("call").unwrap(), b"W1AW");
//! assert_eq!(record.get("band").unwrap(), b"20m");
//! ```

use crate::fields::COMMENT;
use crate::scan::{lowercase_name, trim_ascii_ws};
use crate::tag::parse_descriptor;
use crate::{Error, Record, Result};
use log::trace;
use memchr::{memchr, memchr2};

/// Parses a record span into a [`Record`].
///
/// # Errors
///
/// - [`Error::NoData`] if the span is empty or whitespace-only
/// - [`Error::MalformedTag`] if a tag lacks `>` or its first `:` comes after `>`
/// - [`Error::InvalidFieldLength`], [`Error::TypeCodeTooLong`],
///   [`Error::UnexpectedColon`] for a bad `length[:type]` part
/// - [`Error::TruncatedValue`] if a value runs past the end of the span
/// - [`Error::InvalidFieldName`] if a field name is not valid UTF-8
pub fn parse_record(span: &[u8]) -> Result<Record> {
    if trim_ascii_ws(span).is_empty() {
        return Err(Error::NoData);
    }
    let mut record = Record::new();
    let mut pos = 0;

    loop {
        pos = skip_ws(span, pos);
        let rest = &span[pos..];
        if rest.is_empty() {
            break;
        }

        if rest.starts_with(COMMENT) {
            let skip = memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
            trace!("skipping {} comment bytes at offset {}", skip, pos);
            pos += skip;
            continue;
        }

        let Some(open) = memchr(b'<', rest) else {
            break;
        };
        let tag_offset = pos + open;
        let after_open = &rest[open + 1..];

        let close = memchr(b'>', after_open)
            .ok_or_else(|| Error::malformed_tag(tag_offset, "missing closing '>'"))?;
        let colon = memchr(b':', after_open)
            .filter(|&c| c < close)
            .ok_or_else(|| Error::malformed_tag(tag_offset, "no ':' before '>'"))?;

        let name = &after_open[..colon];
        if name.is_empty() {
            return Err(Error::malformed_tag(tag_offset, "empty field name"));
        }
        let desc = parse_descriptor(name, &after_open[colon + 1..close], tag_offset)?;

        let value_start = open + 1 + close + 1;
        let available = rest.len() - value_start;
        if desc.length > available {
            return Err(Error::truncated_value(name, tag_offset, desc.length, available));
        }
        let name =
            lowercase_name(name).ok_or_else(|| Error::invalid_field_name(name, tag_offset))?;
        let value = &rest[value_start..value_start + desc.length];
        record.set_bytes(name, value.to_vec());

        pos += value_start + desc.length;
    }

    Ok(record)
}

fn skip_ws(buf: &[u8], from: usize) -> usize {
    buf[from..]
        .iter()
        .position(|b| !(b.is_ascii_whitespace() || *b == 0x0b))
        .map_or(buf.len(), |i| from + i)
}
