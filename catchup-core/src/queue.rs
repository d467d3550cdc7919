//! Shared FIFO of completed lines.
//!
//! The reader appends at the back, consumers pop from the front. The handle
//! is cheap to clone and every clone sees the same queue, so a consumer on
//! another thread can own one while the producer keeps feeding.
//!
//! # Architecture
//!
//! ```text
//!   feed() ──push(line)──▶ [ Mutex<VecDeque<Line>> ] ◀──pop()/drain()── consumer
//! ```
//!
//! A line is fully built before it is pushed, and push/pop hold the same
//! lock, so a consumer never sees a half-constructed line.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::line::Line;

#[derive(Debug, Default)]
struct QueueInner {
    lines: VecDeque<Line>,
    /// Lines ever appended.
    pushed: u64,
    /// Lines handed to a consumer.
    popped: u64,
}

/// Cloneable handle to a line queue.
#[derive(Debug, Clone, Default)]
pub struct LineQueue {
    inner: Arc<Mutex<QueueInner>>,
}

impl LineQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, line: Line) {
        let mut inner = self.inner.lock();
        inner.lines.push_back(line);
        inner.pushed += 1;
    }

    /// Remove the oldest unread line. Never blocks on input.
    pub fn pop(&self) -> Option<Line> {
        let mut inner = self.inner.lock();
        let line = inner.lines.pop_front()?;
        inner.popped += 1;
        Some(line)
    }

    /// Remove and return every queued line, oldest first.
    pub fn drain(&self) -> Vec<Line> {
        let mut inner = self.inner.lock();
        let lines: Vec<Line> = inner.lines.drain(..).collect();
        inner.popped += lines.len() as u64;
        lines
    }

    /// Number of queued, unread lines.
    pub fn peek_count(&self) -> usize {
        self.inner.lock().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().lines.is_empty()
    }

    /// Clone of the front line, leaving it queued.
    pub fn peek(&self) -> Option<Line> {
        self.inner.lock().lines.front().cloned()
    }

    pub fn pushed(&self) -> u64 {
        self.inner.lock().pushed
    }

    pub fn popped(&self) -> u64 {
        self.inner.lock().popped
    }

    /// Drop unread lines without handing them out. Returns how many.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let dropped = inner.lines.len();
        inner.lines.clear();
        dropped
    }

    /// Pop lines until the queue is momentarily empty.
    pub fn try_iter(&self) -> impl Iterator<Item = Line> + '_ {
        std::iter::from_fn(move || self.pop())
    }
}
