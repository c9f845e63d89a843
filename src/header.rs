//! Header recognition.
//!
//! An ADIF stream may open with a header: free text, optional header tags,
//! and a closing `<eoh>`. Producers disagree on almost everything here, so
//! recognition is best effort:
//!
//! - Stream starts with `<adif_ver:N>`: the version is decoded and the header
//!   ends at the next `<eoh>`, provided it comes before the first `<eor>`.
//! - Stream starts with `<eoh>`: skip it.
//! - Any other stream starting with `<` has no header; its bytes are passed
//!   on unchanged as the start of the first record.
//! - Otherwise (free text) chunks are gathered until `<eoh>` shows up.
//!
//! After the header, bytes up to the next `<` are dropped. Every decision is
//! made on the stream's content, never on where chunk boundaries fall.
//!
//! Read errors while looking for the header are logged and swallowed. The one
//! fatal case is an `adif_ver` tag whose length cannot be decoded, which
//! means producer and consumer disagree on the format itself.

use crate::fields::{ADIF_VER, EOH, EOR};
use crate::scan::{find_ci, starts_with_ci};
use crate::source::ChunkSource;
use crate::tag::TagTokenizer;
use crate::{Error, Result};
use log::{debug, trace, warn};
use memchr::memchr;
use std::io::Read;

/// What was learned from the stream's header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// Value of `<adif_ver>`, if the header declared one.
    pub version: Option<String>,
    /// Raw bytes before `<eoh>` (empty when there was no header).
    pub preamble: Vec<u8>,
}

/// Result of header recognition: the header and the bytes read past it.
#[derive(Debug, Default)]
pub struct Recognized {
    pub header: Header,
    /// Bytes after the header that belong to the first record.
    pub excess: Vec<u8>,
}

/// Consumes the header (if any) from `source`.
///
/// # Errors
///
/// [`Error::InvalidVersionLength`] when the `adif_ver` tag cannot be decoded.
pub fn recognize<R: Read>(source: &mut ChunkSource<R>) -> Result<Recognized> {
    match source.peek_byte() {
        Ok(Some(b'<')) => debug!("stream starts with a tag"),
        Ok(Some(_)) => debug!("stream starts with free text"),
        Ok(None) => return Ok(Recognized::default()),
        Err(e) => warn!("peeking at stream start failed: {}", e),
    }

    let mut buf = match source.next_chunk() {
        Ok(Some(chunk)) => chunk,
        Ok(None) => return Ok(Recognized::default()),
        Err(e) => {
            warn!("reading header failed: {}", e);
            return Ok(Recognized::default());
        }
    };

    if buf.first() == Some(&b'<') {
        // enough bytes to tell the header tags apart
        while buf.len() < ADIF_VER.len() && pull(source, &mut buf) {}
        tagged_header(source, buf)
    } else {
        Ok(free_text_header(source, buf))
    }
}

/// Appends the next chunk to `buf`; `false` once nothing more can be read.
fn pull<R: Read>(source: &mut ChunkSource<R>, buf: &mut Vec<u8>) -> bool {
    match source.next_chunk() {
        Ok(Some(chunk)) => {
            buf.extend_from_slice(&chunk);
            true
        }
        Ok(None) => false,
        Err(e) => {
            warn!("reading header failed: {}", e);
            false
        }
    }
}

/// Drops everything before the next `<`, reading on until one shows up.
fn skip_to_tag<R: Read>(source: &mut ChunkSource<R>, mut rest: Vec<u8>) -> Vec<u8> {
    loop {
        if let Some(at) = memchr(b'<', &rest) {
            if at > 0 {
                trace!("dropping {} bytes after the header", at);
            }
            rest.drain(..at);
            return rest;
        }
        rest.clear();
        if !pull(source, &mut rest) {
            return rest;
        }
    }
}

fn tagged_header<R: Read>(source: &mut ChunkSource<R>, mut buf: Vec<u8>) -> Result<Recognized> {
    if starts_with_ci(&buf, ADIF_VER) {
        return version_header(source, buf);
    }

    if starts_with_ci(&buf, EOH) {
        debug!("empty header");
        let rest = buf.split_off(EOH.len());
        return Ok(Recognized {
            header: Header::default(),
            excess: skip_to_tag(source, rest),
        });
    }

    debug!("stream starts with an unrecognised tag, treating it as record data");
    Ok(Recognized {
        header: Header::default(),
        excess: buf,
    })
}

fn version_header<R: Read>(source: &mut ChunkSource<R>, mut buf: Vec<u8>) -> Result<Recognized> {
    let (version, after_version) = loop {
        let mut tokens = TagTokenizer::new(&buf);
        match tokens.next_tag() {
            Ok(Some(tag)) => {
                let version = tag.value.map(|v| String::from_utf8_lossy(v).into_owned());
                break (version, tokens.position());
            }
            Ok(None) => {}
            Err(Error::InvalidFieldLength { found, .. }) => {
                return Err(Error::InvalidVersionLength(found))
            }
            Err(e) => return Err(Error::InvalidVersionLength(e.to_string())),
        }
        if !pull(source, &mut buf) {
            warn!("input ended inside the adif_ver tag, passing it on as record data");
            return Ok(Recognized {
                header: Header::default(),
                excess: buf,
            });
        }
    };
    debug!("header declares ADIF version {:?}", version);

    // the header ends at <eoh>, unless a record ends first
    let eoh = loop {
        let eoh = find_ci(&buf, EOH, after_version);
        let eor = find_ci(&buf, EOR, after_version);
        match (eoh, eor) {
            (Some(h), Some(r)) => break (h < r).then_some(h),
            (Some(h), None) => break Some(h),
            (None, Some(_)) => break None,
            (None, None) => {
                if !pull(source, &mut buf) {
                    break None;
                }
            }
        }
    };

    let (preamble_end, rest_start) = match eoh {
        Some(at) => (at, at + EOH.len()),
        None => {
            warn!("no <eoh> after the adif_ver tag, header runs into the first record");
            (after_version, after_version)
        }
    };
    let rest = buf.split_off(rest_start);
    buf.truncate(preamble_end);
    Ok(Recognized {
        header: Header {
            version,
            preamble: buf,
        },
        excess: skip_to_tag(source, rest),
    })
}

fn free_text_header<R: Read>(source: &mut ChunkSource<R>, mut buf: Vec<u8>) -> Recognized {
    let mut scanned = 0;
    let eoh = loop {
        if let Some(at) = find_ci(&buf, EOH, scanned) {
            break at;
        }
        scanned = buf.len().saturating_sub(EOH.len() - 1);
        match source.next_chunk() {
            Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
            Ok(None) => {
                debug!("input ended before <eoh>, {} header bytes dropped", buf.len());
                return Recognized::default();
            }
            Err(e) => {
                warn!("reading header failed: {}", e);
                return Recognized::default();
            }
        }
    };

    let rest = buf.split_off(eoh + EOH.len());
    buf.truncate(eoh);
    debug!("skipped {} bytes of free-text header", buf.len());
    Recognized {
        header: Header {
            version: None,
            preamble: buf,
        },
        excess: skip_to_tag(source, rest),
    }
}
