use std::future::Future;
use std::net::SocketAddr;

use prodline_core::error::{ProdlineError, Result};

use crate::http::{AppState, router};

/// Serves the ingest endpoint and dashboard until `shutdown` resolves.
pub async fn run_http_server<F>(state: AppState, addr: SocketAddr, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ProdlineError::Io(format!("failed to bind {addr}: {e}")))?;
    let local = listener
        .local_addr()
        .map_err(|e| ProdlineError::Io(format!("failed to read bound address: {e}")))?;
    tracing::info!(addr = %local, "http server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ProdlineError::Io(format!("HTTP server failed: {e}")))
}
