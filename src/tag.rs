//! Tag tokenizer.
//!
//! A tag is `<name>`, `<name:length>value` or `<name:length:type>value`.
//! `length` counts the raw value bytes that follow `>`, and those bytes may
//! hold anything, including `<` and `>`.
//!
//! [`TagTokenizer`] walks a byte buffer one tag at a time. Bytes between tags
//! (vendor filler, line breaks) are skipped. It is used to inspect headers;
//! record bodies go through [`crate::parser`], which shares
//! [`parse_descriptor`] with it.
//!
//! ```rust
//! use adif_stream::TagTokenizer;
//!
//! let mut tokens = TagTokenizer::new(b" |FILLER| <TEST:2>XY <EOR>");
//! let tag = tokens.next_tag().unwrap().unwrap();
//! assert_eq!(tag.name, b"TEST");
//! assert_eq!(tag.value, Some(&b"XY"[..]));
//!
//! let eor = tokens.next_tag().unwrap().unwrap();
//! assert!(!eor.has_value());
//! ```

use crate::{Error, Result};
use memchr::memchr;

/// One decoded tag borrowed from the tokenizer's buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Name exactly as written (case preserved).
    pub name: &'a [u8],
    /// Optional one-byte data type indicator.
    pub type_code: Option<u8>,
    /// Declared value length; zero for value-less tags.
    pub length: usize,
    /// Value bytes, `None` for markers such as `<eor>`.
    pub value: Option<&'a [u8]>,
}

impl<'a> Tag<'a> {
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    #[must_use]
    pub fn has_type(&self) -> bool {
        self.type_code.is_some()
    }

    /// Compares the name against `name` ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.as_bytes())
    }
}

/// Decoded `length[:type]` part of a tag, i.e. everything after the first colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub length: usize,
    pub type_code: Option<u8>,
}

/// Decodes the bytes between the first colon and `>`.
///
/// `name` and `offset` only feed error messages.
pub fn parse_descriptor(name: &[u8], descriptor: &[u8], offset: usize) -> Result<Descriptor> {
    let (length_bytes, type_bytes) = match memchr(b':', descriptor) {
        Some(colon) => (&descriptor[..colon], Some(&descriptor[colon + 1..])),
        None => (descriptor, None),
    };

    let type_code = match type_bytes {
        Some(t) if memchr(b':', t).is_some() => {
            return Err(Error::unexpected_colon(name, offset));
        }
        Some(t) if t.len() > 1 => return Err(Error::type_code_too_long(name, offset)),
        Some(t) => t.first().copied(),
        None => None,
    };

    if length_bytes.is_empty() || !length_bytes.iter().all(u8::is_ascii_digit) {
        return Err(Error::invalid_field_length(name, offset, length_bytes));
    }
    // digits only, so from_utf8 cannot fail; overflow still can
    let length = std::str::from_utf8(length_bytes)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| Error::invalid_field_length(name, offset, length_bytes))?;

    Ok(Descriptor { length, type_code })
}

/// Walks a byte buffer yielding one [`Tag`] per call.
pub struct TagTokenizer<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> TagTokenizer<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        TagTokenizer { buf, position: 0 }
    }

    /// Offset of the first byte not yet consumed.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.position..]
    }

    /// Decodes the next tag.
    ///
    /// Returns `Ok(None)` when no complete tag is left: no further `<`, a
    /// missing `>`, or fewer value bytes than declared. The position is left
    /// untouched in that case so the caller can see what remains.
    pub fn next_tag(&mut self) -> Result<Option<Tag<'a>>> {
        let rest = self.remaining();
        let Some(open) = memchr(b'<', rest) else {
            return Ok(None);
        };
        let start = self.position + open;
        let inner_start = open + 1;
        let Some(close) = memchr(b'>', &rest[inner_start..]) else {
            return Ok(None);
        };
        let inner = &rest[inner_start..inner_start + close];
        let value_start = inner_start + close + 1;

        let tag = match memchr(b':', inner) {
            None => {
                self.position += value_start;
                Tag {
                    name: inner,
                    type_code: None,
                    length: 0,
                    value: None,
                }
            }
            Some(colon) => {
                let name = &inner[..colon];
                let desc = match parse_descriptor(name, &inner[colon + 1..], start) {
                    Ok(desc) => desc,
                    Err(e) => {
                        // step over the bad tag so iteration cannot stall on it
                        self.position += value_start;
                        return Err(e);
                    }
                };
                let value_end = value_start + desc.length;
                if value_end > rest.len() {
                    return Ok(None);
                }
                self.position += value_end;
                Tag {
                    name,
                    type_code: desc.type_code,
                    length: desc.length,
                    value: Some(&rest[value_start..value_end]),
                }
            }
        };
        Ok(Some(tag))
    }
}

impl<'a> Iterator for TagTokenizer<'a> {
    type Item = Result<Tag<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_tag().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filler_between_tags() {
        let mut tokens = TagTokenizer::new(b" |FILLER1| <TEST:2>XY |FILLER 2| <EOR>  ");
        let tag = tokens.next_tag().unwrap().unwrap();
        assert_eq!(tag.name, b"TEST");
        assert_eq!(tag.value, Some(&b"XY"[..]));
        assert_eq!(tag.length, 2);

        let tag = tokens.next_tag().unwrap().unwrap();
        assert_eq!(tag.name, b"EOR");
        assert!(!tag.has_value());
        assert!(tokens.next_tag().unwrap().is_none());
    }

    #[test]
    fn test_type_code() {
        let mut tokens = TagTokenizer::new(b"<freq:6:N>14.074");
        let tag = tokens.next_tag().unwrap().unwrap();
        assert_eq!(tag.type_code, Some(b'N'));
        assert!(tag.has_type());
        assert_eq!(tag.value, Some(&b"14.074"[..]));
    }

    #[test]
    fn test_value_may_contain_brackets() {
        let mut tokens = TagTokenizer::new(b"<notes:5><a:1><x:1>y");
        let tag = tokens.next_tag().unwrap().unwrap();
        assert_eq!(tag.value, Some(&b"<a:1>"[..]));
        let tag = tokens.next_tag().unwrap().unwrap();
        assert_eq!(tag.name, b"x");
    }

    #[test]
    fn test_descriptor_errors() {
        assert!(matches!(
            parse_descriptor(b"n", b"1a", 0),
            Err(Error::InvalidFieldLength { .. })
        ));
        assert!(matches!(
            parse_descriptor(b"n", b"", 0),
            Err(Error::InvalidFieldLength { .. })
        ));
        assert!(matches!(
            parse_descriptor(b"n", b"1:ab", 0),
            Err(Error::TypeCodeTooLong { .. })
        ));
        assert!(matches!(
            parse_descriptor(b"n", b"1:a:b", 0),
            Err(Error::UnexpectedColon { .. })
        ));
        assert!(matches!(
            parse_descriptor(b"n", b"99999999999999999999999", 0),
            Err(Error::InvalidFieldLength { .. })
        ));
    }

    #[test]
    fn test_empty_type_code() {
        let desc = parse_descriptor(b"n", b"3:", 0).unwrap();
        assert_eq!(desc.length, 3);
        assert_eq!(desc.type_code, None);
    }

    #[test]
    fn test_truncated_value_is_incomplete() {
        let mut tokens = TagTokenizer::new(b"<adif_ver:5>3.0");
        assert!(tokens.next_tag().unwrap().is_none());
        assert_eq!(tokens.position(), 0);
    }

    #[test]
    fn test_iterator_yields_all_tags() {
        let names: Vec<_> = TagTokenizer::new(b"<a:1>x<b:2>yy<eoh>")
            .map(|t| t.unwrap().name.to_vec())
            .collect();
        assert_eq!(names, vec![b"a".to_vec(), b"b".to_vec(), b"eoh".to_vec()]);
    }

    #[test]
    fn test_is_ignores_case() {
        let mut tokens = TagTokenizer::new(b"<ADIF_Ver:3>3.1");
        assert!(tokens.next_tag().unwrap().unwrap().is("adif_ver"));
    }
}
