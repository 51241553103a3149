//! Backup storage port.

use std::path::Path;

use crate::domain::backup::BackupFile;
use crate::error::Result;

/// Port for taking and restoring whole-file database backups.
pub trait BackupVault {
    /// Copy `database` verbatim into the vault and verify the copy.
    fn create(&self, database: &Path) -> Result<BackupFile>;

    /// Overwrite `database` in place with the contents of `backup`.
    fn restore(&self, backup: &BackupFile, database: &Path) -> Result<()>;
}
