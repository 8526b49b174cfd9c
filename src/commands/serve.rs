//! `userload serve` command.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::server::{serve_on, UserStore};

/// Execute the `serve` command: bind `addr` and serve until interrupted.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start, the address cannot
/// be bound, or the server stops with an I/O error.
pub fn run(addr: SocketAddr) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    runtime.block_on(async {
        let listener =
            TcpListener::bind(addr).await.map_err(|e| format!("Failed to bind {addr}: {e}"))?;
        serve_on(listener, UserStore::new()).await.map_err(|e| format!("Server error: {e}"))
    })
}
