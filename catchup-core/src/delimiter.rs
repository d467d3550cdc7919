//! Delimiter state machine.
//!
//! Turns a byte stream, delivered across any number of [`Splitter::split`]
//! calls, into a sequence of [`Segment`]s: runs of ordinary content, line
//! boundaries, and swallowed partner bytes of two-byte delimiters.
//!
//! # Chunk boundaries
//!
//! The only state that survives between calls is [`DelimiterState`], and it
//! lives on the splitter, never on the stack of a single call. Feeding
//! `"a\r"` then `"\nb"` produces exactly the segments that `"a\r\nb"` does in
//! one call (modulo how content runs are cut), so the line sequence built
//! from them is independent of the partition.
//!
//! ```text
//!   bytes ──▶ [AwaitingPartner?] ──partner──▶ Segment::Partner
//!                    │ no
//!                    ▼
//!             [delimiter byte?] ──yes──▶ Segment::Boundary ──▶ AwaitingPartner / Idle
//!                    │ no
//!                    ▼
//!             Segment::Content ──▶ Idle
//! ```

use std::fmt;
use std::str::FromStr;

use memchr::{memchr, memchr2};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Carriage return.
pub const CR: u8 = b'\r';
/// Line feed.
pub const LF: u8 = b'\n';

/// One of the two bytes that can take part in a delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterByte {
    Cr,
    Lf,
}

impl DelimiterByte {
    /// Classify a raw byte. Anything but CR or LF is `None`.
    #[inline]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CR => Some(Self::Cr),
            LF => Some(Self::Lf),
            _ => None,
        }
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Cr => CR,
            Self::Lf => LF,
        }
    }

    /// CR for LF and LF for CR.
    #[inline]
    pub fn complement(self) -> Self {
        match self {
            Self::Cr => Self::Lf,
            Self::Lf => Self::Cr,
        }
    }
}

/// Which byte sequences end a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterMode {
    /// Only LF ends a line. CR is content.
    Lf,
    /// Only CR ends a line. LF is content.
    Cr,
    /// CR, LF and CR LF each end a line. LF CR is two line ends.
    #[default]
    CrLf,
    /// CR, LF, CR LF and LF CR each end a line.
    Mixed,
}

impl DelimiterMode {
    pub const ALL: [DelimiterMode; 4] = [Self::Lf, Self::Cr, Self::CrLf, Self::Mixed];

    /// Whether `byte` ends a line under this mode.
    #[inline]
    pub fn classify(self, byte: u8) -> Option<DelimiterByte> {
        let kind = DelimiterByte::from_byte(byte)?;
        match (self, kind) {
            (Self::Lf, DelimiterByte::Cr) | (Self::Cr, DelimiterByte::Lf) => None,
            _ => Some(kind),
        }
    }

    /// Whether a delimiter byte of type `first` may be followed by its
    /// complement to form a single two-byte delimiter.
    #[inline]
    pub fn pairs_after(self, first: DelimiterByte) -> bool {
        match self {
            Self::Lf | Self::Cr => false,
            Self::CrLf => first == DelimiterByte::Cr,
            Self::Mixed => true,
        }
    }

    /// Position and kind of the first delimiter byte in `haystack`.
    #[inline]
    pub fn find(self, haystack: &[u8]) -> Option<(usize, DelimiterByte)> {
        match self {
            Self::Lf => memchr(LF, haystack).map(|pos| (pos, DelimiterByte::Lf)),
            Self::Cr => memchr(CR, haystack).map(|pos| (pos, DelimiterByte::Cr)),
            Self::CrLf | Self::Mixed => memchr2(CR, LF, haystack).and_then(|pos| {
                DelimiterByte::from_byte(haystack[pos]).map(|kind| (pos, kind))
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Lf => "lf",
            Self::Cr => "cr",
            Self::CrLf => "crlf",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for DelimiterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DelimiterMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lf" => Ok(Self::Lf),
            "cr" => Ok(Self::Cr),
            "crlf" => Ok(Self::CrLf),
            "mixed" => Ok(Self::Mixed),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Partial-delimiter state carried between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterState {
    #[default]
    Idle,
    /// The previous byte was a delimiter of this kind, and its line is
    /// already closed. A complement arriving next is swallowed.
    AwaitingPartner(DelimiterByte),
}

/// A piece of classified input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A non-empty run of ordinary content bytes.
    Content(&'a [u8]),
    /// A delimiter byte that closes the current line.
    Boundary(DelimiterByte),
    /// The second byte of a two-byte delimiter. Closes nothing.
    Partner(DelimiterByte),
}

/// Streaming delimiter classifier.
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    mode: DelimiterMode,
    state: DelimiterState,
}

impl Splitter {
    pub fn new(mode: DelimiterMode) -> Self {
        Self {
            mode,
            state: DelimiterState::Idle,
        }
    }

    #[inline]
    pub fn mode(&self) -> DelimiterMode {
        self.mode
    }

    #[inline]
    pub fn state(&self) -> DelimiterState {
        self.state
    }

    /// Classify `chunk`, continuing from wherever the previous call stopped.
    ///
    /// Segments are emitted in stream order. An empty chunk emits nothing and
    /// leaves the state untouched.
    pub fn split<'a, F>(&mut self, chunk: &'a [u8], mut emit: F)
    where
        F: FnMut(Segment<'a>),
    {
        let mut pos = 0;
        while pos < chunk.len() {
            if let DelimiterState::AwaitingPartner(kind) = self.state {
                let partner = kind.complement();
                if chunk[pos] == partner.as_byte() {
                    self.state = DelimiterState::Idle;
                    emit(Segment::Partner(partner));
                    pos += 1;
                    continue;
                }
                // Not a partner: the byte is classified below as if fresh.
            }

            let rest = &chunk[pos..];
            let Some((offset, kind)) = self.mode.find(rest) else {
                self.state = DelimiterState::Idle;
                emit(Segment::Content(rest));
                return;
            };

            if offset > 0 {
                emit(Segment::Content(&rest[..offset]));
            }
            self.state = if self.mode.pairs_after(kind) {
                DelimiterState::AwaitingPartner(kind)
            } else {
                DelimiterState::Idle
            };
            emit(Segment::Boundary(kind));
            pos += offset + 1;
        }
    }

    /// Forget any half-seen delimiter.
    pub fn reset(&mut self) {
        self.state = DelimiterState::Idle;
    }
}
