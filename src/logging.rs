//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr so that stdout carries only response lines.

use tracing_subscriber::EnvFilter;

/// Filter for client commands when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Filter for `serve`, so request logs show up without extra flags.
pub const SERVE_FILTER: &str = "info";

/// Builds the filter from an explicit level, then `RUST_LOG`, then `default`.
#[must_use]
pub fn env_filter(log_level: Option<&str>, default: &str) -> EnvFilter {
    match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{level}', falling back to '{default}'");
            EnvFilter::new(default)
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
    }
}

/// Installs the global stderr subscriber. Later calls are no-ops.
pub fn init(log_level: Option<&str>, default: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level, default))
        .with_writer(std::io::stderr)
        .try_init();
}
