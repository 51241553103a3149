//! Backup file naming.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Timestamp layout embedded in backup file names (`YYYYMMDD-HHMMSS`).
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// A verified copy of the database taken before mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub path: PathBuf,
    pub size: u64,
}

/// File name for a backup of `database` taken at `taken_at`.
///
/// `phobos-bot.db` at 2024-03-05 14:07:09 becomes
/// `phobos-bot.db.backup-20240305-140709`.
#[must_use]
pub fn backup_file_name(database: &Path, taken_at: NaiveDateTime) -> String {
    let name = database
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "database".to_string());
    format!(
        "{name}.backup-{}",
        taken_at.format(BACKUP_TIMESTAMP_FORMAT)
    )
}
