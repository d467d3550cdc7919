//! Completed lines.

use std::borrow::Cow;

use crate::config::DecodePolicy;
use crate::delimiter::DelimiterByte;
use crate::error::DecodeError;

/// One completed line.
///
/// Immutable once built. `seq` is the 0-based discovery order across the
/// whole stream, so consumers on different threads can still tell where a
/// line belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    seq: u64,
    text: Result<String, DecodeError>,
    terminator: Option<DelimiterByte>,
}

impl Line {
    pub(crate) fn decode(
        seq: u64,
        bytes: Vec<u8>,
        terminator: Option<DelimiterByte>,
        policy: DecodePolicy,
    ) -> Self {
        let text = match policy {
            DecodePolicy::Strict => String::from_utf8(bytes).map_err(DecodeError::from_utf8),
            DecodePolicy::Lossy => Ok(match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
            }),
        };
        Self {
            seq,
            text,
            terminator,
        }
    }

    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The decoded text, or the per-line decode failure.
    pub fn text(&self) -> Result<&str, &DecodeError> {
        self.text.as_deref()
    }

    pub fn into_text(self) -> Result<String, DecodeError> {
        self.text
    }

    /// Text with invalid sequences replaced, whatever the decode outcome.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        match &self.text {
            Ok(text) => Cow::Borrowed(text),
            Err(err) => String::from_utf8_lossy(&err.bytes),
        }
    }

    /// Raw line content without the delimiter.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.text {
            Ok(text) => text.as_bytes(),
            Err(err) => &err.bytes,
        }
    }

    /// The delimiter byte that closed this line; `None` for a flushed tail.
    #[inline]
    pub fn terminator(&self) -> Option<DelimiterByte> {
        self.terminator
    }

    pub fn is_decoded(&self) -> bool {
        self.text.is_ok()
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}
