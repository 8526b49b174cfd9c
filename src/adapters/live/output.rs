//! Live adapter for the `LineSink` port writing to standard output.

use std::io::{self, Write};

use crate::ports::LineSink;

/// Writes each line to stdout, flushing so lines appear as responses arrive.
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn emit(&self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()
    }
}
