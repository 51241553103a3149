//! Filesystem adapters.

pub mod backup;
