//! HTTP server.
//!
//! A plain axum listener around the resolution core:
//!
//! ```text
//! Browser ──HTTP──► axum router
//!                     ├─► /, /daily/{folder}, /view  ──► index / detail ──► PageRenderer
//!                     ├─► /<content_root>/...         ──► tower-http ServeDir
//!                     └─► /static/..., /assets/...    ──► ServeDir / embedded
//! ```
//!
//! Requests share nothing but the immutable [`AppState`]; every request
//! re-reads the filesystem.

mod app;
mod handlers;
mod security;
mod state;

pub use app::create_router;
pub use state::AppState;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

/// Bind `host:port` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener fails.
pub async fn run_server(
    state: Arc<AppState>,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from_str(&format!("{host}:{port}"))?;
    let app = create_router(state);

    tracing::info!(address = %addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
