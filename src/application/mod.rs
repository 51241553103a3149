//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! through ports.

pub mod sanitize;
