//! Error types for a load run.

use std::io;

use thiserror::Error;

use crate::ports::ApiError;

/// Reasons a load run stops before reaching its iteration count.
#[derive(Debug, Error)]
pub enum RunError {
    /// A request cycle (connect, send, or body read) failed.
    #[error("request cycle {iteration} for username {username:?} failed: {source}")]
    Cycle {
        /// Zero-based index of the failed iteration.
        iteration: u64,
        /// Username that was being registered.
        username: String,
        /// Underlying transport error.
        #[source]
        source: ApiError,
    },

    /// The response line could not be written.
    #[error("failed to write output line: {0}")]
    Output(#[from] io::Error),
}
