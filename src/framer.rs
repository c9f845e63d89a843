//! Record framing.
//!
//! [`RecordFramer`] cuts a chunked byte stream into record spans: the bytes
//! before each case-insensitive `<eor>`, with carriage returns and line feeds
//! trimmed from both ends. Whatever was read past the marker is kept as
//! excess for the next call.
//!
//! LoTW appends `<app_lotw_eof>` after the last record. When that sentinel
//! appears, it and everything after it are discarded before the `<eor>`
//! lookup, and by default no further chunks are read.
//!
//! A blank span means end of input. Once the source is exhausted, leftover
//! bytes that still hold a tag are returned as one final span.

use crate::fields::{EOR, LOTW_EOF};
use crate::scan::{find_ci, is_blank, trim_crlf};
use crate::source::ChunkSource;
use crate::{Error, Result};
use log::{debug, trace};
use memchr::memchr;
use std::io::Read;

#[derive(Debug, Default)]
pub struct RecordFramer {
    excess: Vec<u8>,
    /// No more chunks will be pulled: the source ended or the sentinel was seen.
    source_done: bool,
    /// End of input has been reported.
    finished: bool,
    stop_at_sentinel: bool,
}

impl RecordFramer {
    pub fn new(excess: Vec<u8>, stop_at_sentinel: bool) -> Self {
        RecordFramer {
            excess,
            source_done: false,
            finished: false,
            stop_at_sentinel,
        }
    }

    /// Bytes read past the last returned span.
    #[must_use]
    pub fn excess(&self) -> &[u8] {
        &self.excess
    }

    /// `true` once end of input has been reported.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the next record span, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the source fails. Buffered bytes are dropped in that
    /// case, matching a stream that cannot be trusted past the failure.
    pub fn next_span<R: Read>(&mut self, source: &mut ChunkSource<R>) -> Result<Option<Vec<u8>>> {
        if self.finished {
            return Ok(None);
        }
        let mut buf = std::mem::take(&mut self.excess);

        let mut eor_scanned = 0;
        let mut sentinel_scanned = 0;
        let found_eor = loop {
            if find_ci(&buf, EOR, eor_scanned).is_some() {
                break true;
            }
            if self.stop_at_sentinel && find_ci(&buf, LOTW_EOF, sentinel_scanned).is_some() {
                // nothing after the sentinel can become a record
                self.source_done = true;
            }
            if self.source_done {
                break false;
            }
            eor_scanned = buf.len().saturating_sub(EOR.len() - 1);
            sentinel_scanned = buf.len().saturating_sub(LOTW_EOF.len() - 1);
            match source.next_chunk() {
                Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
                Ok(None) => self.source_done = true,
                Err(e) => return Err(Error::io(e)),
            }
        };

        if let Some(at) = find_ci(&buf, LOTW_EOF, 0) {
            debug!(
                "found LoTW end-of-file sentinel, dropping {} trailing bytes",
                buf.len() - at
            );
            buf.truncate(at);
            if self.stop_at_sentinel {
                self.source_done = true;
            }
        }

        let eor = if found_eor { find_ci(&buf, EOR, 0) } else { None };
        let span = match eor {
            Some(at) => {
                self.excess = buf.split_off(at + EOR.len());
                buf.truncate(at);
                trim_crlf(&buf).to_vec()
            }
            // input ended without a marker, or the sentinel took it along
            None => self.final_span(&buf),
        };

        if is_blank(&span) {
            trace!("blank record span, end of input");
            self.finished = true;
            self.excess.clear();
            return Ok(None);
        }
        Ok(Some(span))
    }

    /// Trailing bytes without `<eor>`; filler without any tag is not a record.
    fn final_span(&self, buf: &[u8]) -> Vec<u8> {
        let trimmed = trim_crlf(buf);
        if memchr(b'<', trimmed).is_none() {
            if !trimmed.is_empty() {
                trace!("ignoring {} bytes of trailing filler", trimmed.len());
            }
            return Vec::new();
        }
        trimmed.to_vec()
    }
}
