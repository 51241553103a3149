//! Phobos tools - maintenance utilities for the phobos bot deployment.
//!
//! Two binaries are built from this crate:
//!
//! - **`cleanup-db`** - backs up the bot's SQLite database, deletes user data
//!   and blanks sensitive configuration in one transaction, then compacts
//!   the file. Any failure after the backup restores the original file.
//! - **`phobos-http-server`** - serves one directory over HTTP with
//!   directory listing disabled and path traversal rejected.
//!
//! # Architecture
//!
//! - [`domain`] - Framework-free types: tables, cleanup plan, reports,
//!   served-root path resolution
//! - [`port`] - Traits the sanitizer is written against
//! - [`application`] - The sanitize use case and its restore guard
//! - [`adapter`] - CLI and HTTP inbound adapters; SQLite and filesystem
//!   outbound adapters
//! - [`infrastructure`] - Configuration loading and logging setup
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use phobos_tools::adapter::outbound::fs::backup::FsBackupVault;
//! use phobos_tools::adapter::outbound::sqlite::store::SqliteCleanupStore;
//! use phobos_tools::application::sanitize::service::Sanitizer;
//!
//! let sanitizer = Sanitizer::new("phobos-bot.db", FsBackupVault::new("backups"));
//! let outcome = sanitizer.run::<SqliteCleanupStore>(&mut |_| {})?;
//! assert!(outcome.is_completed());
//! # Ok::<(), phobos_tools::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
