//! Byte scanning helpers shared by the header recognizer, framer and parser.
//!
//! Marker comparison is ASCII-only: bytes outside `A-Z` are compared as-is,
//! so non-ASCII payloads are never folded or reinterpreted.

use memchr::memchr2;

/// Finds `needle` in `haystack` ignoring ASCII case, starting at `from`.
///
/// Returns the absolute index of the first match.
pub fn find_ci(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    let first = *needle.first()?;
    let n = needle.len();
    let mut pos = from;
    while pos + n <= haystack.len() {
        let rel = memchr2(
            first.to_ascii_lowercase(),
            first.to_ascii_uppercase(),
            &haystack[pos..=haystack.len() - n],
        )?;
        let at = pos + rel;
        if haystack[at..at + n].eq_ignore_ascii_case(needle) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// Returns `true` if `haystack` begins with `prefix` ignoring ASCII case.
pub fn starts_with_ci(haystack: &[u8], prefix: &[u8]) -> bool {
    haystack.len() >= prefix.len() && haystack[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Strips carriage returns and line feeds from both ends.
pub fn trim_crlf(buf: &[u8]) -> &[u8] {
    trim_matches(buf, |b| b == b'\r' || b == b'\n')
}

/// Strips ASCII whitespace from both ends.
pub fn trim_ascii_ws(buf: &[u8]) -> &[u8] {
    trim_matches(buf, |b| b.is_ascii_whitespace() || b == 0x0b)
}

/// Returns `true` for empty or whitespace-only buffers.
pub fn is_blank(buf: &[u8]) -> bool {
    trim_ascii_ws(buf).is_empty()
}

fn trim_matches(buf: &[u8], strip: impl Fn(u8) -> bool) -> &[u8] {
    let start = buf.iter().position(|&b| !strip(b)).unwrap_or(buf.len());
    let end = buf.iter().rposition(|&b| !strip(b)).map_or(start, |i| i + 1);
    &buf[start..end]
}

/// Lowercases a field name byte-wise (ASCII only).
///
/// Returns `None` when the name is not valid UTF-8. Non-ASCII bytes of a
/// valid name are kept as they are.
pub fn lowercase_name(name: &[u8]) -> Option<String> {
    String::from_utf8(name.to_ascii_lowercase()).ok()
}
