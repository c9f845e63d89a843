//! Configuration options for ADIF readers.
//!
//! - [`ReaderOptions`]: chunk size, assumed format version and sentinel handling
//!
//! ## Examples
//!
//! ```rust
//! use adif_stream::{Reader, ReaderOptions, RecordReader};
//!
//! let input: &[u8] = b"<call:4>W1AW<eor>";
//!
//! // Feed the framer one byte at a time
//! let options = ReaderOptions::new().with_chunk_size(1);
//! let mut reader = Reader::with_options(input, options);
//! assert!(reader.read_record().unwrap().is_some());
//! ```

/// Default number of bytes pulled from the source per read.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Version assumed when the stream carries no `adif_ver` header tag.
pub const DEFAULT_VERSION: &str = "2";

/// Configuration options for [`crate::Reader`].
///
/// # Examples
///
/// ```rust
/// use adif_stream::ReaderOptions;
///
/// let options = ReaderOptions::new()
///     .with_chunk_size(4096)
///     .with_default_version("3.1.4")
///     .with_stop_at_sentinel(false);
/// assert_eq!(options.chunk_size, 4096);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderOptions {
    pub chunk_size: usize,
    pub default_version: String,
    pub stop_at_sentinel: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            chunk_size: DEFAULT_CHUNK_SIZE,
            default_version: DEFAULT_VERSION.to_string(),
            stop_at_sentinel: true,
        }
    }
}

impl ReaderOptions {
    /// Creates default options (1024-byte chunks, version `"2"`, stop at sentinel).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adif_stream::ReaderOptions;
    ///
    /// let options = ReaderOptions::new();
    /// assert_eq!(options.chunk_size, 1024);
    /// assert!(options.stop_at_sentinel);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of bytes requested from the source per read.
    ///
    /// Zero is raised to one. The chunk size affects performance only; the
    /// records read are the same for any size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Sets the version reported when no header declares one.
    #[must_use]
    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.default_version = version.into();
        self
    }

    /// Controls whether the LoTW end-of-file sentinel ends the stream.
    ///
    /// When `true` (the default) nothing after `<app_lotw_eof>` is read. When
    /// `false` the sentinel only truncates the buffer it was found in.
    #[must_use]
    pub fn with_stop_at_sentinel(mut self, stop: bool) -> Self {
        self.stop_at_sentinel = stop;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_chunk_size_is_raised() {
        assert_eq!(ReaderOptions::new().with_chunk_size(0).chunk_size, 1);
    }

    #[test]
    fn test_defaults() {
        let options = ReaderOptions::default();
        assert_eq!(options.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(options.default_version, "2");
    }
}
