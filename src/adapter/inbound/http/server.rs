//! Router assembly, listener binding and the serve loop.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use super::access_log::access_log;
use super::handler::serve_static;
use crate::domain::site::ServedRoot;
use crate::error::{Result, ServeError};

/// Router answering every path and method from `root`.
pub fn router(root: ServedRoot) -> Router {
    Router::new()
        .fallback(serve_static)
        .layer(middleware::from_fn(access_log))
        .with_state(Arc::new(root))
}

/// Bind a TCP listener on `addr:port`.
///
/// # Errors
/// Returns [`ServeError::Bind`] if the address is taken or invalid.
pub async fn bind(addr: &str, port: u16) -> Result<TcpListener> {
    let target = if addr.contains(':') && !addr.starts_with('[') {
        format!("[{addr}]:{port}")
    } else {
        format!("{addr}:{port}")
    };

    TcpListener::bind(&target)
        .await
        .map_err(|source| ServeError::Bind { addr: target, source }.into())
}

/// Serve `root` on `listener` until `shutdown` resolves.
///
/// # Errors
/// Returns an I/O error if the accept loop fails.
pub async fn serve<F>(listener: TcpListener, root: ServedRoot, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(local) = listener.local_addr() {
        info!(addr = %local, root = %root.path().display(), "Serving static files");
    }

    let app = router(root).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
