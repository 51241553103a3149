//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The sanitizer service is written against these traits; the SQLite and
//! filesystem adapters implement them.

pub mod outbound;
