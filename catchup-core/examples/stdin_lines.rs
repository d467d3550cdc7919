//! Read stdin in small chunks and print each completed line.
//!
//! Usage: stdin_lines [lf|cr|crlf|mixed]
//! Set RUST_LOG=catchup_core=trace to watch the reader work.

use std::io::Read;

use catchup_core::{CatchUpReader, DelimiterMode, ReaderError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mode: DelimiterMode = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => DelimiterMode::default(),
    };

    let mut reader = CatchUpReader::with_mode(mode);
    let mut stdin = std::io::stdin().lock();
    let mut buf = [0u8; 64];

    loop {
        let n = stdin.read(&mut buf)?;
        if n == 0 {
            break;
        }
        match reader.feed(&buf[..n]) {
            Ok(_) | Err(ReaderError::LineTooLong { .. }) => {}
            Err(err) => return Err(err.into()),
        }
        print_lines(&reader);
    }

    reader.flush();
    print_lines(&reader);

    let stats = reader.stats();
    eprintln!(
        "{} bytes, {} lines ({} mode)",
        stats.bytes_read, stats.lines_delimited, mode
    );
    Ok(())
}

fn print_lines(reader: &CatchUpReader) {
    while let Some(line) = reader.pop_line() {
        match line.text() {
            Ok(text) => println!("{:>5}: {}", line.seq(), text),
            Err(err) => println!("{:>5}! {} ({})", line.seq(), line.text_lossy(), err),
        }
    }
}
