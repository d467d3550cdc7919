//! CatchUp Core
//!
//! Incremental line splitting over a byte stream that arrives in arbitrary
//! chunks. The same bytes produce the same lines however they are chunked,
//! including a `CR LF` pair split across two deliveries.
//!
//! # Architecture
//!
//! - **delimiter.rs** - Delimiter modes, DelimiterState, streaming Splitter
//! - **reader.rs** - CatchUpReader: pending bytes, line limit, stats
//! - **queue.rs** - Shared FIFO LineQueue for consumers
//! - **line.rs** - Line values with per-line decode result
//! - **config.rs** - ReaderConfig (TOML loadable)
//! - **source.rs** - Draining `std::io` sources into the reader
//! - **error.rs** - Error types

pub mod config;
pub mod delimiter;
pub mod error;
pub mod line;
pub mod queue;
pub mod reader;
pub mod source;

pub use config::{DecodePolicy, ReaderConfig};
pub use delimiter::{DelimiterByte, DelimiterMode, DelimiterState, Segment, Splitter};
pub use error::{ConfigError, DecodeError, ReaderError};
pub use line::Line;
pub use queue::LineQueue;
pub use reader::{CatchUpReader, FeedResult, ReaderStats};
