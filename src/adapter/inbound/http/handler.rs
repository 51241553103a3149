//! Request handler for the static file server.
//!
//! Every request goes through [`serve_static`]; there are no other routes.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::Response;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use super::response::{error_response, file_response};
use crate::domain::site::{Resolution, ServedRoot};

pub const ACCESS_DENIED: &str = "Access denied";
pub const LISTING_FORBIDDEN: &str = "Directory listing is forbidden";
pub const FILE_NOT_FOUND: &str = "File not found";
pub const INDEX_NOT_FOUND: &str = "Index not found";
pub const UNSUPPORTED_METHOD: &str = "Unsupported method";

/// Resolve the request path against the served root and answer it.
pub async fn serve_static(
    State(root): State<Arc<ServedRoot>>,
    method: Method,
    uri: Uri,
) -> Response {
    let head = match method {
        Method::GET => false,
        Method::HEAD => true,
        _ => return error_response(StatusCode::NOT_IMPLEMENTED, UNSUPPORTED_METHOD),
    };

    match root.resolve(uri.path()) {
        Resolution::Escape => {
            debug!(path = uri.path(), "Rejected path outside served root");
            error_response(StatusCode::FORBIDDEN, ACCESS_DENIED)
        }
        Resolution::Index(index) => match fs::metadata(&index).await {
            Ok(meta) if meta.is_file() => send_file(&index, head).await,
            _ => error_response(StatusCode::NOT_FOUND, INDEX_NOT_FOUND),
        },
        Resolution::Target(target) => match fs::metadata(&target).await {
            Ok(meta) if meta.is_dir() => error_response(StatusCode::FORBIDDEN, LISTING_FORBIDDEN),
            Ok(meta) if meta.is_file() => send_file(&target, head).await,
            _ => error_response(StatusCode::NOT_FOUND, FILE_NOT_FOUND),
        },
    }
}

/// Open and stream a regular file, or only its headers for HEAD.
async fn send_file(path: &Path, head: bool) -> Response {
    let file = match fs::File::open(path).await {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Failed to open file");
            return error_response(StatusCode::NOT_FOUND, FILE_NOT_FOUND);
        }
    };
    let meta = match file.metadata().await {
        Ok(meta) => meta,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Failed to stat open file");
            return error_response(StatusCode::NOT_FOUND, FILE_NOT_FOUND);
        }
    };

    let body = if head {
        Body::empty()
    } else {
        Body::from_stream(ReaderStream::new(file))
    };
    file_response(path, meta.len(), meta.modified().ok(), body)
}
