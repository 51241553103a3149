//! Database connection management using Diesel ORM.
//!
//! The sanitizer works on a single connection to an existing SQLite file;
//! there is no pool and no migration step.

use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::error::{Error, Result};

/// Open an existing SQLite database file.
///
/// SQLite creates missing files on connect, so callers check for existence
/// first.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub fn open(path: &Path) -> Result<SqliteConnection> {
    let url = path
        .to_str()
        .ok_or_else(|| Error::Connection(format!("non UTF-8 database path: {}", path.display())))?;
    let mut conn = SqliteConnection::establish(url)?;
    configure_sqlite_connection(&mut conn)?;
    Ok(conn)
}

/// Configure SQLite connection pragmas used for maintenance work.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(conn: &mut SqliteConnection) -> Result<()> {
    conn.batch_execute("PRAGMA busy_timeout=5000")?;
    Ok(())
}
