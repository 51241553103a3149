//! Database sanitizer use case.

pub mod guard;
pub mod service;
