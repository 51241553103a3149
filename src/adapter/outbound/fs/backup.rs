//! Filesystem backup vault.
//!
//! Backups are plain byte copies placed in one directory, named
//! `<database file name>.backup-<YYYYMMDD-HHMMSS>` using local time.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use crate::domain::backup::{backup_file_name, BackupFile};
use crate::error::{Result, SanitizeError};
use crate::port::outbound::backup::BackupVault;

/// Backup vault rooted at a directory, created on first use.
#[derive(Debug, Clone)]
pub struct FsBackupVault {
    dir: PathBuf,
}

impl FsBackupVault {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy `database` into the vault under the name for `taken_at`.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the copy fails,
    /// or the copy's size differs from the source.
    pub fn create_at(&self, database: &Path, taken_at: NaiveDateTime) -> Result<BackupFile> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(backup_file_name(database, taken_at));

        let expected = fs::metadata(database)?.len();
        let copied = fs::copy(database, &path)?;
        let actual = fs::metadata(&path)?.len();

        if copied != expected || actual != expected {
            if let Err(e) = fs::remove_file(&path) {
                warn!(error = %e, path = %path.display(), "Failed to remove bad backup");
            }
            return Err(SanitizeError::BackupMismatch {
                path,
                expected,
                actual,
            }
            .into());
        }

        info!(path = %path.display(), size = actual, "Backup created");
        Ok(BackupFile { path, size: actual })
    }
}

impl BackupVault for FsBackupVault {
    fn create(&self, database: &Path) -> Result<BackupFile> {
        self.create_at(database, Local::now().naive_local())
    }

    fn restore(&self, backup: &BackupFile, database: &Path) -> Result<()> {
        fs::copy(&backup.path, database)?;
        info!(backup = %backup.path.display(), database = %database.display(), "Database restored from backup");
        Ok(())
    }
}
