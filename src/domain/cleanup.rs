//! Cleanup plan: the ordered statements a sanitizer run executes.
//!
//! The plan is derived from the set of tables that actually exist, so a
//! database missing some tables never sees a statement against them.

use std::fmt;

use super::backup::BackupFile;
use super::table::{
    ExistingTables, TableCounts, CLEARED_TABLES, CONFIGURATION_TABLE, SENSITIVE_CONFIG_KEYS,
    SEQUENCE_RESET_TABLES, SEQUENCE_TABLE,
};

/// One mutating step of the cleanup transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupStep {
    /// Delete every row of a table.
    ClearTable(&'static str),
    /// Blank the values of the listed configuration keys.
    BlankConfiguration { keys: Vec<&'static str> },
    /// Drop auto-increment counters for the listed tables.
    ResetSequences { tables: Vec<&'static str> },
}

impl fmt::Display for CleanupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClearTable("blocked_users") => write!(f, "Deleting blocked users"),
            Self::ClearTable("blocklist") => write!(f, "Deleting blocklist entries"),
            Self::ClearTable(table) => write!(f, "Deleting {table}"),
            Self::BlankConfiguration { .. } => write!(f, "Clearing sensitive configuration"),
            Self::ResetSequences { .. } => write!(f, "Resetting auto-increment counters"),
        }
    }
}

/// What a sanitizer run removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupPlan {
    pub cleared_tables: Vec<&'static str>,
    pub sensitive_keys: Vec<&'static str>,
    pub sequence_tables: Vec<&'static str>,
}

impl Default for CleanupPlan {
    fn default() -> Self {
        Self {
            cleared_tables: CLEARED_TABLES.to_vec(),
            sensitive_keys: SENSITIVE_CONFIG_KEYS.to_vec(),
            sequence_tables: SEQUENCE_RESET_TABLES.to_vec(),
        }
    }
}

impl CleanupPlan {
    /// Steps to execute against a database containing `existing` tables.
    #[must_use]
    pub fn steps(&self, existing: &ExistingTables) -> Vec<CleanupStep> {
        let mut steps: Vec<CleanupStep> = self
            .cleared_tables
            .iter()
            .copied()
            .filter(|table| existing.contains(*table))
            .map(CleanupStep::ClearTable)
            .collect();

        if existing.contains(CONFIGURATION_TABLE) && !self.sensitive_keys.is_empty() {
            steps.push(CleanupStep::BlankConfiguration {
                keys: self.sensitive_keys.clone(),
            });
        }

        if existing.contains(SEQUENCE_TABLE) && !self.sequence_tables.is_empty() {
            steps.push(CleanupStep::ResetSequences {
                tables: self.sequence_tables.clone(),
            });
        }

        steps
    }
}

/// Progress notifications emitted while a run is underway.
#[derive(Debug)]
pub enum Progress<'a> {
    BackupCreated(&'a BackupFile),
    Counted(&'a TableCounts),
    Step(&'a CleanupStep),
    Vacuuming,
    Restoring(&'a BackupFile),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::KNOWN_TABLES;

    fn existing(names: &[&str]) -> ExistingTables {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn full_schema_produces_every_step() {
        let mut names = KNOWN_TABLES.to_vec();
        names.push(SEQUENCE_TABLE);
        let steps = CleanupPlan::default().steps(&existing(&names));

        assert_eq!(
            steps,
            vec![
                CleanupStep::ClearTable("users"),
                CleanupStep::ClearTable("logs"),
                CleanupStep::ClearTable("feedback"),
                CleanupStep::ClearTable("blocked_users"),
                CleanupStep::ClearTable("blocklist"),
                CleanupStep::BlankConfiguration {
                    keys: vec!["bot_token", "scripts_dir", "clients_dir"],
                },
                CleanupStep::ResetSequences {
                    tables: vec!["logs", "feedback"],
                },
            ]
        );
    }

    #[test]
    fn absent_tables_are_skipped() {
        let steps = CleanupPlan::default().steps(&existing(&["users", "message_templates"]));
        assert_eq!(steps, vec![CleanupStep::ClearTable("users")]);
    }

    #[test]
    fn sequence_reset_requires_bookkeeping_table() {
        let steps = CleanupPlan::default().steps(&existing(&["logs"]));
        assert!(!steps
            .iter()
            .any(|s| matches!(s, CleanupStep::ResetSequences { .. })));
    }

    #[test]
    fn empty_database_has_no_steps() {
        assert!(CleanupPlan::default().steps(&existing(&[])).is_empty());
    }

    #[test]
    fn step_labels_read_as_progress() {
        assert_eq!(CleanupStep::ClearTable("users").to_string(), "Deleting users");
        assert_eq!(
            CleanupStep::ClearTable("blocklist").to_string(),
            "Deleting blocklist entries"
        );
        assert_eq!(
            CleanupStep::BlankConfiguration { keys: vec![] }.to_string(),
            "Clearing sensitive configuration"
        );
    }
}
