//! Tables of the bot datastore and their row counts.

use std::collections::BTreeSet;

/// Every table the sanitizer reports on, in report order.
pub const KNOWN_TABLES: [&str; 7] = [
    "users",
    "logs",
    "feedback",
    "blocked_users",
    "blocklist",
    "message_templates",
    "configuration",
];

/// Tables whose rows are deleted outright.
pub const CLEARED_TABLES: [&str; 5] = ["users", "logs", "feedback", "blocked_users", "blocklist"];

/// Table holding key/value settings; kept, with sensitive values blanked.
pub const CONFIGURATION_TABLE: &str = "configuration";

/// Configuration keys whose values are blanked.
pub const SENSITIVE_CONFIG_KEYS: [&str; 3] = ["bot_token", "scripts_dir", "clients_dir"];

/// SQLite's auto-increment bookkeeping table.
pub const SEQUENCE_TABLE: &str = "sqlite_sequence";

/// Tables whose auto-increment counters are reset.
pub const SEQUENCE_RESET_TABLES: [&str; 2] = ["logs", "feedback"];

/// Names of the tables present in a database.
pub type ExistingTables = BTreeSet<String>;

/// Row count for one known table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

/// Row counts for all [`KNOWN_TABLES`], zero for missing tables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableCounts {
    counts: Vec<TableCount>,
}

impl TableCounts {
    /// Build counts by asking `count` for each known table that exists.
    ///
    /// Tables absent from `existing` are recorded as zero without calling `count`.
    pub fn collect<E>(
        existing: &ExistingTables,
        mut count: impl FnMut(&'static str) -> Result<i64, E>,
    ) -> Result<Self, E> {
        let mut counts = Vec::with_capacity(KNOWN_TABLES.len());
        for table in KNOWN_TABLES {
            let rows = if existing.contains(table) {
                count(table)?
            } else {
                0
            };
            counts.push(TableCount { table, rows });
        }
        Ok(Self { counts })
    }

    /// Rows recorded for `table`, zero if unknown.
    #[must_use]
    pub fn get(&self, table: &str) -> i64 {
        self.counts
            .iter()
            .find(|c| c.table == table)
            .map_or(0, |c| c.rows)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableCount> {
        self.counts.iter()
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.counts.iter().map(|c| c.rows).sum()
    }
}

/// Human label for a known table, as printed in reports.
#[must_use]
pub fn display_name(table: &str) -> &str {
    match table {
        "users" => "Users",
        "logs" => "Logs",
        "feedback" => "Feedback",
        "blocked_users" => "Blocked users",
        "blocklist" => "Blocklist",
        "message_templates" => "Message templates",
        "configuration" => "Configuration",
        other => other,
    }
}
