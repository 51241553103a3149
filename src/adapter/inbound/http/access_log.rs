//! Access log middleware: one line per request on the tracing subscriber.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use crate::infrastructure::config::logging::ACCESS_LOG_TARGET;

/// Log client address, request line and response status.
pub async fn access_log(request: Request, next: Next) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "-".to_string(), |ConnectInfo(addr)| addr.ip().to_string());
    let request_line = format!(
        "{} {} {:?}",
        request.method(),
        request.uri(),
        request.version()
    );

    let response = next.run(request).await;

    info!(
        target: ACCESS_LOG_TARGET,
        client = %client,
        request = %request_line,
        status = response.status().as_u16(),
        "\"{request_line}\" {}",
        response.status().as_u16()
    );
    response
}
