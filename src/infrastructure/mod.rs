//! Infrastructure layer.
//!
//! Technical concerns that support the tools without containing their
//! logic: configuration loading and logging setup.

pub mod config;
