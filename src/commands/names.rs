//! `userload names` command.

use crate::adapters::live::{LiveNameGenerator, StdoutSink};
use crate::ports::{LineSink, NameGenerator};

/// Execute the `names` command: print `count` generated names.
///
/// # Errors
///
/// Returns an error string if writing to stdout fails.
pub fn run(count: u64) -> Result<(), String> {
    run_with(&LiveNameGenerator, &StdoutSink, count)
}

/// Print `count` names from `names` to `out`.
///
/// # Errors
///
/// Returns an error string if a line cannot be written.
pub fn run_with(names: &dyn NameGenerator, out: &dyn LineSink, count: u64) -> Result<(), String> {
    for _ in 0..count {
        out.emit(&names.generate_name()).map_err(|e| format!("Failed to write name: {e}"))?;
    }
    Ok(())
}
