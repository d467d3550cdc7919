//! Pulling bytes from `std::io` sources.
//!
//! The reader itself never does I/O. These helpers drain whatever a source
//! can deliver right now and push it through [`CatchUpReader::feed`], which
//! is how a caller polls a pipe or a log file that another process is still
//! writing.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use tracing::trace;

use crate::error::ReaderError;
use crate::reader::CatchUpReader;

const READ_BUF_SIZE: usize = 8 * 1024;

impl CatchUpReader {
    /// Read until the source reports end of data or would block.
    ///
    /// Returns the number of bytes read by this call. When the writer has
    /// been marked stopped, the tail is flushed once after the source is
    /// drained (not after every read buffer). An overlong line does not stop
    /// the drain; its error is returned once the source is exhausted.
    pub fn read_from<R: Read + ?Sized>(&mut self, source: &mut R) -> Result<u64, ReaderError> {
        let mut buf = [0u8; READ_BUF_SIZE];
        let mut total = 0u64;
        let mut overflow = None;

        loop {
            match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    total += n as u64;
                    if let Err(err) = self.feed_with_flush(&buf[..n], false) {
                        overflow.get_or_insert(err);
                    }
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => break,
                Err(err) => return Err(err.into()),
            }
        }

        if self.writer_stopped() {
            self.flush();
        }
        trace!(bytes = total, "drained source");

        match overflow {
            Some(err) => Err(err),
            None => Ok(total),
        }
    }

    /// Seek to where this reader left off, then [`read_from`](Self::read_from).
    ///
    /// For a file that keeps growing, this picks up exactly the bytes
    /// appended since the last call, even if the handle was reopened.
    pub fn catch_up<R: Read + Seek + ?Sized>(&mut self, source: &mut R) -> Result<u64, ReaderError> {
        let offset = self.stats().bytes_read;
        source.seek(SeekFrom::Start(offset))?;
        self.read_from(source)
    }
}
