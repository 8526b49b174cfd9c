//! Output port for the per-iteration log lines.

use std::io;

/// Receives one line per completed iteration.
pub trait LineSink: Send + Sync {
    /// Writes a single line.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn emit(&self, line: &str) -> io::Result<()>;
}
