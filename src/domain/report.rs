//! Results of a sanitizer run.

use super::backup::BackupFile;
use super::cleanup::CleanupStep;
use super::table::TableCounts;

/// Report for a committed and compacted cleanup.
#[derive(Debug, Clone)]
pub struct CleanupReport {
    pub backup: BackupFile,
    pub before: TableCounts,
    pub after: TableCounts,
    pub steps: Vec<CleanupStep>,
    pub database_size: u64,
}

impl CleanupReport {
    /// Bytes reclaimed relative to the backup; negative if the file grew.
    #[must_use]
    pub fn space_saved(&self) -> i64 {
        self.backup.size as i64 - self.database_size as i64
    }
}

/// Report for a run whose cleanup failed and whose database was restored.
#[derive(Debug, Clone)]
pub struct RollbackReport {
    pub backup: BackupFile,
    pub before: Option<TableCounts>,
    pub error: String,
}

/// Outcome of a sanitizer run.
#[derive(Debug, Clone)]
pub enum SanitizeOutcome {
    Completed(CleanupReport),
    RolledBack(RollbackReport),
}

impl SanitizeOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// What a run would do, computed without backing up or mutating.
#[derive(Debug, Clone)]
pub struct DryRunReport {
    pub counts: TableCounts,
    pub steps: Vec<CleanupStep>,
    pub database_size: u64,
}

/// Format a byte count the way reports show it: `12,288 bytes (12.00 KB)`.
#[must_use]
pub fn format_bytes(bytes: i64) -> String {
    let digits = bytes.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if bytes < 0 { "-" } else { "" };
    format!("{sign}{grouped} bytes ({:.2} KB)", bytes as f64 / 1024.0)
}
