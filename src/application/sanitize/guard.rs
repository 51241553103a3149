//! Scoped restore of the live database from its backup.

use std::path::Path;

use tracing::{error, warn};

use crate::domain::backup::BackupFile;
use crate::error::Result;
use crate::port::outbound::backup::BackupVault;

/// Restores the database from `backup` unless disarmed.
///
/// Created as soon as a backup exists. A run that completes calls
/// [`disarm`](Self::disarm); every other exit path either calls
/// [`restore`](Self::restore) explicitly or restores on drop.
pub struct RestoreGuard<'a, V: BackupVault> {
    vault: &'a V,
    backup: &'a BackupFile,
    database: &'a Path,
    armed: bool,
}

impl<'a, V: BackupVault> RestoreGuard<'a, V> {
    pub fn new(vault: &'a V, backup: &'a BackupFile, database: &'a Path) -> Self {
        Self {
            vault,
            backup,
            database,
            armed: true,
        }
    }

    /// Keep the current database; the backup stays on disk.
    pub fn disarm(mut self) {
        self.armed = false;
    }

    /// Restore now and report the result.
    ///
    /// # Errors
    /// Returns the vault error if the copy fails.
    pub fn restore(mut self) -> Result<()> {
        self.armed = false;
        self.vault.restore(self.backup, self.database)
    }
}

impl<V: BackupVault> Drop for RestoreGuard<'_, V> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!(backup = %self.backup.path.display(), "Run ended early, restoring database");
        if let Err(e) = self.vault.restore(self.backup, self.database) {
            error!(error = %e, backup = %self.backup.path.display(), "Restore from backup failed");
        }
    }
}
