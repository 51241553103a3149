//! SQLite-backed cleanup store.
//!
//! Implements the [`CleanupStore`](crate::port::outbound::store::CleanupStore)
//! port on top of a single Diesel connection.

use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::adapter::outbound::sqlite::connection;
use crate::domain::cleanup::CleanupStep;
use crate::domain::table::{ExistingTables, CONFIGURATION_TABLE, SEQUENCE_TABLE};
use crate::error::{Error, Result};
use crate::port::outbound::store::CleanupStore;

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

/// Cleanup store over one open SQLite connection.
pub struct SqliteCleanupStore {
    conn: SqliteConnection,
}

impl SqliteCleanupStore {
    /// Wrap an already configured connection.
    #[must_use]
    pub fn from_connection(conn: SqliteConnection) -> Self {
        Self { conn }
    }
}

impl CleanupStore for SqliteCleanupStore {
    fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_connection(connection::open(path)?))
    }

    fn checkpoint(&mut self) -> Result<()> {
        // No-op for databases not in WAL mode.
        self.conn.batch_execute("PRAGMA wal_checkpoint(TRUNCATE)")?;
        Ok(())
    }

    fn existing_tables(&mut self) -> Result<ExistingTables> {
        let names = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
        )
        .load::<TableName>(&mut self.conn)?;
        Ok(names.into_iter().map(|t| t.name).collect())
    }

    fn count_rows(&mut self, table: &str) -> Result<i64> {
        let row = diesel::sql_query(format!(
            "SELECT COUNT(*) AS count FROM {}",
            quote_identifier(table)
        ))
        .get_result::<RowCount>(&mut self.conn)?;
        Ok(row.count)
    }

    fn apply(
        &mut self,
        steps: &[CleanupStep],
        on_step: &mut dyn FnMut(&CleanupStep),
    ) -> Result<()> {
        self.conn.transaction::<_, Error, _>(|conn| {
            for step in steps {
                on_step(step);
                let sql = step_sql(step);
                let affected = diesel::sql_query(&sql).execute(conn)?;
                debug!(step = %step, affected, "Executed cleanup step");
            }
            Ok(())
        })
    }

    fn vacuum(&mut self) -> Result<()> {
        self.conn.batch_execute("VACUUM")?;
        Ok(())
    }
}

/// SQL text for one cleanup step.
#[must_use]
pub fn step_sql(step: &CleanupStep) -> String {
    match step {
        CleanupStep::ClearTable(table) => format!("DELETE FROM {}", quote_identifier(table)),
        CleanupStep::BlankConfiguration { keys } => format!(
            "UPDATE {} SET config_value = '' WHERE config_key IN ({})",
            quote_identifier(CONFIGURATION_TABLE),
            quote_literals(keys)
        ),
        CleanupStep::ResetSequences { tables } => format!(
            "DELETE FROM {} WHERE name IN ({})",
            SEQUENCE_TABLE,
            quote_literals(tables)
        ),
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literals(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(", ")
}
