//! Test infrastructure for the CatchUp reader
//!
//! Provides delimiter fixtures, chunk-partition drivers and a naive
//! byte-at-a-time reference splitter to compare against.

mod fixtures;
mod harness;

#[allow(unused_imports)]
pub use fixtures::{FIXTURES, CRLF_TEXT};
#[allow(unused_imports)]
pub use harness::{
    byte_chunks, reference_lines, render, run_chunks, run_split, run_whole, Outcome,
};
