//! HTTP server lifecycle

use crate::api::build_router;
use crate::api::state::AppState;
use crate::domain::{Result, ShiftSyncError};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Binds the listener for `host:port`
///
/// # Errors
///
/// Returns an I/O error if the address is unavailable
pub async fn bind(address: &str) -> Result<TcpListener> {
    TcpListener::bind(address)
        .await
        .map_err(|e| ShiftSyncError::Io(format!("Failed to bind {address}: {e}")))
}

/// Serves the API until the shutdown channel flips to `true`
///
/// In-flight requests finish before this returns.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let local_addr: Option<SocketAddr> = listener.local_addr().ok();
    tracing::info!(
        address = ?local_addr,
        database = state.records.store().backend_name(),
        require_auth = state.require_auth,
        "ShiftSync API listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow_and_update() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
            tracing::info!("Shutdown signal received, draining connections");
        })
        .await
        .map_err(|e| ShiftSyncError::Io(format!("Server error: {e}")))?;

    tracing::info!("ShiftSync API stopped");
    Ok(())
}
