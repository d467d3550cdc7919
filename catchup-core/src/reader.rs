//! The catch-up reader.
//!
//! Input arrives through [`CatchUpReader::feed`] in whatever pieces the
//! transport produced. The [`Splitter`] classifies it, and the assembler
//! below turns segments into [`Line`]s on the shared [`LineQueue`].
//!
//! # Memory
//!
//! Only the current unterminated line is buffered. With
//! [`ReaderConfig::max_line_len`] set, a line that outgrows the limit is
//! dropped as a whole: its bytes so far are released and everything up to
//! the next delimiter is skipped.

use tracing::{debug, trace, warn};

use crate::config::{DecodePolicy, ReaderConfig};
use crate::delimiter::{DelimiterByte, DelimiterMode, DelimiterState, Segment, Splitter};
use crate::error::ReaderError;
use crate::line::Line;
use crate::queue::LineQueue;

/// Running totals for one reader.
///
/// `bytes_read - bytes_delimited` is always the number of pending bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderStats {
    /// Bytes passed to `feed`.
    pub bytes_read: u64,
    /// Bytes no longer pending: emitted line content, delimiter bytes,
    /// swallowed partners and discarded overlong content.
    pub bytes_delimited: u64,
    /// Lines appended to the queue.
    pub lines_delimited: u64,
    /// Lines handed out by the queue.
    pub lines_returned: u64,
    /// Lines dropped for exceeding `max_line_len`.
    pub lines_discarded: u64,
}

/// Result of a feed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedResult {
    /// Number of bytes consumed from input (always the whole chunk)
    pub bytes_consumed: usize,
    /// Number of lines appended to the queue by this call
    pub lines_queued: usize,
    /// Whether this call ended with a flush (writer stopped)
    pub flushed: bool,
}

/// Discard bookkeeping for a line that overflowed.
#[derive(Debug, Clone, Copy)]
struct Discard {
    bytes: u64,
}

#[derive(Debug)]
struct Assembler {
    pending: Vec<u8>,
    discard: Option<Discard>,
    max_line_len: Option<usize>,
    decode: DecodePolicy,
    queue: LineQueue,
    stats: ReaderStats,
    /// First overflow seen during the current call.
    overflow: Option<usize>,
}

impl Assembler {
    fn accept(&mut self, segment: Segment<'_>) {
        match segment {
            Segment::Content(bytes) => self.append(bytes),
            Segment::Boundary(kind) => self.close(Some(kind)),
            Segment::Partner(_) => self.stats.bytes_delimited += 1,
        }
    }

    fn append(&mut self, bytes: &[u8]) {
        if let Some(discard) = &mut self.discard {
            discard.bytes += bytes.len() as u64;
            self.stats.bytes_delimited += bytes.len() as u64;
            return;
        }

        if let Some(limit) = self.max_line_len {
            if self.pending.len() + bytes.len() > limit {
                let dropped = (self.pending.len() + bytes.len()) as u64;
                self.pending.clear();
                self.discard = Some(Discard { bytes: dropped });
                self.stats.bytes_delimited += dropped;
                self.stats.lines_discarded += 1;
                self.overflow.get_or_insert(limit);
                return;
            }
        }

        self.pending.extend_from_slice(bytes);
    }

    fn close(&mut self, terminator: Option<DelimiterByte>) {
        if terminator.is_some() {
            self.stats.bytes_delimited += 1;
        }

        if let Some(discard) = self.discard.take() {
            warn!(
                limit = ?self.max_line_len,
                discarded_bytes = discard.bytes,
                "dropped line exceeding max_line_len"
            );
            return;
        }

        let bytes = std::mem::take(&mut self.pending);
        self.stats.bytes_delimited += bytes.len() as u64;

        let seq = self.stats.lines_delimited;
        let line = Line::decode(seq, bytes, terminator, self.decode);
        if let Err(err) = line.text() {
            debug!(seq, valid_up_to = err.valid_up_to, "line is not valid UTF-8");
        }
        self.queue.push(line);
        self.stats.lines_delimited += 1;
    }

    fn flush(&mut self) -> bool {
        if self.discard.is_some() {
            self.close(None);
            return false;
        }
        if self.pending.is_empty() {
            return false;
        }
        self.close(None);
        true
    }
}

/// Incremental line reader over a chunked byte stream.
///
/// ```
/// use catchup_core::{CatchUpReader, DelimiterMode};
///
/// let mut reader = CatchUpReader::with_mode(DelimiterMode::CrLf);
/// reader.feed(b"first\r").unwrap();
/// reader.feed(b"\nsecond\r\nthi").unwrap();
///
/// let lines: Vec<String> = reader
///     .drain_lines()
///     .into_iter()
///     .map(|line| line.into_text().unwrap())
///     .collect();
/// assert_eq!(lines, ["first", "second"]);
/// assert_eq!(reader.pending_len(), 3);
/// ```
#[derive(Debug)]
pub struct CatchUpReader {
    config: ReaderConfig,
    splitter: Splitter,
    assembler: Assembler,
    writer_stopped: bool,
}

impl CatchUpReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self {
            splitter: Splitter::new(config.mode),
            assembler: Assembler {
                pending: Vec::new(),
                discard: None,
                max_line_len: config.max_line_len,
                decode: config.decode,
                queue: LineQueue::new(),
                stats: ReaderStats::default(),
                overflow: None,
            },
            config,
            writer_stopped: false,
        }
    }

    pub fn with_mode(mode: DelimiterMode) -> Self {
        Self::new(ReaderConfig::new(mode))
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    #[inline]
    pub fn mode(&self) -> DelimiterMode {
        self.splitter.mode()
    }

    /// Split `chunk` into lines, continuing from the previous call.
    ///
    /// The whole chunk is always consumed. If a line overflowed
    /// `max_line_len` during this call, the error is returned after the
    /// chunk has been processed; lines completed in the same call stay
    /// queued.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<FeedResult, ReaderError> {
        self.feed_with_flush(chunk, self.writer_stopped)
    }

    pub(crate) fn feed_with_flush(
        &mut self,
        chunk: &[u8],
        flush: bool,
    ) -> Result<FeedResult, ReaderError> {
        let before = self.assembler.stats.lines_delimited;
        self.assembler.stats.bytes_read += chunk.len() as u64;

        let assembler = &mut self.assembler;
        self.splitter.split(chunk, |segment| assembler.accept(segment));

        let flushed = flush && self.flush();
        let lines_queued = (self.assembler.stats.lines_delimited - before) as usize;
        trace!(
            chunk_len = chunk.len(),
            lines_queued,
            pending = self.assembler.pending.len(),
            state = ?self.splitter.state(),
            "fed chunk"
        );

        if let Some(limit) = self.assembler.overflow.take() {
            return Err(ReaderError::LineTooLong { limit });
        }
        Ok(FeedResult {
            bytes_consumed: chunk.len(),
            lines_queued,
            flushed,
        })
    }

    /// Emit the unterminated tail as a final line.
    ///
    /// Returns whether a line was queued. Nothing pending means nothing
    /// queued, so calling this twice is harmless. The delimiter state is left
    /// alone: a partner byte arriving afterwards is still swallowed.
    pub fn flush(&mut self) -> bool {
        let pending = self.assembler.pending.len();
        let emitted = self.assembler.flush();
        if emitted {
            debug!(bytes = pending, "flushed unterminated line");
        }
        emitted
    }

    /// Declare that the producer has stopped writing.
    ///
    /// While set, every [`feed`](Self::feed) ends with a [`flush`](Self::flush),
    /// so `feed(&[])` delivers whatever is left.
    pub fn set_writer_stopped(&mut self, stopped: bool) {
        self.writer_stopped = stopped;
    }

    pub fn writer_stopped(&self) -> bool {
        self.writer_stopped
    }

    pub fn pop_line(&self) -> Option<Line> {
        self.assembler.queue.pop()
    }

    pub fn drain_lines(&self) -> Vec<Line> {
        self.assembler.queue.drain()
    }

    pub fn peek_count(&self) -> usize {
        self.assembler.queue.peek_count()
    }

    /// A handle on the line queue for a consumer elsewhere.
    pub fn queue(&self) -> LineQueue {
        self.assembler.queue.clone()
    }

    pub fn pending_len(&self) -> usize {
        self.assembler.pending.len()
    }

    pub fn delimiter_state(&self) -> DelimiterState {
        self.splitter.state()
    }

    pub fn stats(&self) -> ReaderStats {
        ReaderStats {
            lines_returned: self.assembler.queue.popped(),
            ..self.assembler.stats
        }
    }
}

impl Default for CatchUpReader {
    fn default() -> Self {
        Self::new(ReaderConfig::default())
    }
}
