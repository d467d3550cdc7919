//! Error types.
//!
//! Nothing in the delimiter path is fatal. Decode failures travel with the
//! line they belong to ([`DecodeError`]); everything the caller has to react
//! to comes back as a [`ReaderError`].

use thiserror::Error;

/// A completed line whose bytes are not valid UTF-8.
///
/// Attached to the queue slot of that line. The raw bytes are kept so a
/// consumer can still inspect or re-decode them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line is not valid UTF-8 (valid up to byte {valid_up_to} of {len})", len = .bytes.len())]
pub struct DecodeError {
    /// Length of the longest valid UTF-8 prefix.
    pub valid_up_to: usize,
    /// The undecoded line content, without its delimiter.
    pub bytes: Vec<u8>,
}

impl DecodeError {
    pub(crate) fn from_utf8(err: std::string::FromUtf8Error) -> Self {
        let valid_up_to = err.utf8_error().valid_up_to();
        Self {
            valid_up_to,
            bytes: err.into_bytes(),
        }
    }
}

/// Errors returned by [`CatchUpReader`](crate::CatchUpReader) operations.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// A line grew past the configured limit and was dropped.
    ///
    /// The chunk that triggered it was still consumed completely.
    #[error("line too long: exceeded {limit} bytes and was discarded")]
    LineTooLong { limit: usize },

    /// Reading from the byte source failed.
    #[error("failed to read from source: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from building or parsing a [`ReaderConfig`](crate::ReaderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse reader config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid reader config: {message}")]
    Invalid { message: String },

    #[error("unknown delimiter mode '{0}' (expected lf, cr, crlf or mixed)")]
    UnknownMode(String),
}
