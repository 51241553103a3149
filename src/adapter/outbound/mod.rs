//! Outbound adapters (driven side).

pub mod fs;
pub mod sqlite;
