//! Command dispatch and handlers.

pub mod names;
pub mod run;
pub mod serve;

use crate::cli::Command;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Run(args) => run::run(args).map(|_| ()),
        Command::Names { count } => names::run(*count),
        Command::Serve { bind } => serve::run(*bind),
    }
}
