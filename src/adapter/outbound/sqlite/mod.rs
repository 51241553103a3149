//! SQLite persistence adapters.
//!
//! Provides connection management and the cleanup store used by the
//! sanitizer, built on Diesel ORM.

pub mod connection;
pub mod store;
