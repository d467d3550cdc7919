//! Drive a reader over chunk partitions and render what it produced.

use catchup_core::{CatchUpReader, DelimiterByte, DelimiterMode, Line, ReaderConfig, ReaderStats};

/// Everything observable about one run, for comparing partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Lines queued before the final flush.
    pub lines: Vec<String>,
    /// Pending bytes before the final flush.
    pub pending: usize,
    /// Line produced by the final flush, if any.
    pub flushed: Option<String>,
    pub stats: ReaderStats,
}

/// Text plus how the line ended, e.g. `"a"\n` or `"tail"<eof>`.
pub fn render(line: &Line) -> String {
    format!("{:?}{}", line.text_lossy(), ending(line.terminator()))
}

fn ending(terminator: Option<DelimiterByte>) -> &'static str {
    match terminator {
        Some(DelimiterByte::Cr) => "\\r",
        Some(DelimiterByte::Lf) => "\\n",
        None => "<eof>",
    }
}

/// Feed `chunks` in order, then flush.
///
/// Overlong-line errors are expected in some runs and ignored here; their
/// effect shows up in the lines and stats.
pub fn run_chunks(config: &ReaderConfig, chunks: &[&[u8]]) -> Outcome {
    let mut reader = CatchUpReader::new(config.clone());
    for chunk in chunks {
        let _ = reader.feed(chunk);
    }
    let lines = reader.drain_lines().iter().map(render).collect();
    let pending = reader.pending_len();
    let flushed = if reader.flush() {
        reader.pop_line().as_ref().map(render)
    } else {
        None
    };
    Outcome {
        lines,
        pending,
        flushed,
        stats: reader.stats(),
    }
}

pub fn run_whole(config: &ReaderConfig, input: &[u8]) -> Outcome {
    run_chunks(config, &[input])
}

/// Split `input` at each of `cuts` (sorted, deduplicated, clamped).
pub fn run_split(config: &ReaderConfig, input: &[u8], cuts: &[usize]) -> Outcome {
    let mut points: Vec<usize> = cuts.iter().map(|&c| c.min(input.len())).collect();
    points.sort_unstable();
    points.dedup();

    let mut chunks = Vec::with_capacity(points.len() + 1);
    let mut start = 0;
    for point in points {
        chunks.push(&input[start..point]);
        start = point;
    }
    chunks.push(&input[start..]);
    run_chunks(config, &chunks)
}

pub fn byte_chunks(input: &[u8]) -> Vec<&[u8]> {
    input.iter().map(std::slice::from_ref).collect()
}

/// Naive per-byte splitter written straight from the delimiter rules.
///
/// Returns every line including a flushed tail, rendered like [`render`].
pub fn reference_lines(mode: DelimiterMode, input: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending = Vec::new();
    let mut waiting: Option<u8> = None;

    for &byte in input {
        if let Some(previous) = waiting.take() {
            let partner = if previous == b'\r' { b'\n' } else { b'\r' };
            let pairs = match mode {
                DelimiterMode::CrLf => previous == b'\r',
                DelimiterMode::Mixed => true,
                DelimiterMode::Lf | DelimiterMode::Cr => false,
            };
            if pairs && byte == partner {
                continue;
            }
        }

        let terminator = match (mode, byte) {
            (DelimiterMode::Lf, b'\n') | (DelimiterMode::CrLf | DelimiterMode::Mixed, b'\n') => {
                Some(DelimiterByte::Lf)
            }
            (DelimiterMode::Cr, b'\r') | (DelimiterMode::CrLf | DelimiterMode::Mixed, b'\r') => {
                Some(DelimiterByte::Cr)
            }
            _ => None,
        };

        match terminator {
            Some(kind) => {
                lines.push(format!(
                    "{:?}{}",
                    String::from_utf8_lossy(&pending),
                    ending(Some(kind))
                ));
                pending.clear();
                waiting = Some(byte);
            }
            None => pending.push(byte),
        }
    }

    if !pending.is_empty() {
        lines.push(format!("{:?}{}", String::from_utf8_lossy(&pending), ending(None)));
    }
    lines
}
