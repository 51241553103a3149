//! Static file server over axum.

pub mod access_log;
pub mod handler;
pub mod response;
pub mod server;
