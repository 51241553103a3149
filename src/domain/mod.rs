//! Framework-free types for both tools.

pub mod backup;
pub mod cleanup;
pub mod report;
pub mod site;
pub mod table;
