//! Database sanitizer use case.
//!
//! A run checks the database exists, checkpoints any write-ahead log into
//! the main file, takes a verified backup, snapshots row counts, applies the
//! cleanup plan in one transaction, vacuums, and snapshots again. Any failure after the backup restores the live file from
//! it, so the database ends either fully cleaned or byte-identical to its
//! pre-run state.

use std::fs;
use std::path::PathBuf;

use tracing::{error, info};

use crate::application::sanitize::guard::RestoreGuard;
use crate::domain::cleanup::{CleanupPlan, CleanupStep, Progress};
use crate::domain::report::{CleanupReport, DryRunReport, RollbackReport, SanitizeOutcome};
use crate::domain::table::TableCounts;
use crate::error::{Result, SanitizeError};
use crate::port::outbound::backup::BackupVault;
use crate::port::outbound::store::CleanupStore;

/// Row counts and executed steps of a successful cleanup.
struct Cleaned {
    before: TableCounts,
    after: TableCounts,
    steps: Vec<CleanupStep>,
}

/// Sanitizes one database file using a backup vault.
pub struct Sanitizer<V: BackupVault> {
    database: PathBuf,
    vault: V,
    plan: CleanupPlan,
}

impl<V: BackupVault> Sanitizer<V> {
    pub fn new(database: impl Into<PathBuf>, vault: V) -> Self {
        Self {
            database: database.into(),
            vault,
            plan: CleanupPlan::default(),
        }
    }

    #[must_use]
    pub fn with_plan(mut self, plan: CleanupPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Size of the database file, or `DatabaseNotFound`.
    fn ensure_database(&self) -> Result<u64> {
        match fs::metadata(&self.database) {
            Ok(meta) if meta.is_file() => Ok(meta.len()),
            _ => Err(SanitizeError::DatabaseNotFound {
                path: self.database.clone(),
            }
            .into()),
        }
    }

    /// Report counts and planned steps without backing up or mutating.
    ///
    /// # Errors
    /// Returns `DatabaseNotFound` or a store error.
    pub fn preview<S: CleanupStore>(&self) -> Result<DryRunReport> {
        let database_size = self.ensure_database()?;
        let mut store = S::open(&self.database)?;
        let existing = store.existing_tables()?;
        let counts = TableCounts::collect(&existing, |table| store.count_rows(table))?;

        Ok(DryRunReport {
            counts,
            steps: self.plan.steps(&existing),
            database_size,
        })
    }

    /// Back up, clean and compact the database.
    ///
    /// A cleanup failure is not an error: the database is restored and
    /// [`SanitizeOutcome::RolledBack`] is returned.
    ///
    /// # Errors
    /// Returns `DatabaseNotFound` before any backup is attempted, a backup
    /// error before any mutation, or `RestoreFailed` if the rollback copy
    /// itself fails.
    pub fn run<S: CleanupStore>(
        &self,
        progress: &mut dyn FnMut(Progress<'_>),
    ) -> Result<SanitizeOutcome> {
        self.ensure_database()?;
        S::open(&self.database)?.checkpoint()?;

        let backup = self.vault.create(&self.database)?;
        progress(Progress::BackupCreated(&backup));
        let guard = RestoreGuard::new(&self.vault, &backup, &self.database);

        let mut before = None;
        match self.clean::<S>(&mut before, progress) {
            Ok(cleaned) => {
                guard.disarm();
                let database_size = fs::metadata(&self.database)?.len();
                info!(
                    database = %self.database.display(),
                    removed = cleaned.before.total() - cleaned.after.total(),
                    "Cleanup completed"
                );
                Ok(SanitizeOutcome::Completed(CleanupReport {
                    backup,
                    before: cleaned.before,
                    after: cleaned.after,
                    steps: cleaned.steps,
                    database_size,
                }))
            }
            Err(cause) => {
                error!(error = %cause, "Cleanup failed, rolling back");
                progress(Progress::Restoring(&backup));
                if let Err(restore) = guard.restore() {
                    return Err(SanitizeError::RestoreFailed {
                        backup: backup.path.clone(),
                        cause: cause.to_string(),
                        restore: restore.to_string(),
                    }
                    .into());
                }
                Ok(SanitizeOutcome::RolledBack(RollbackReport {
                    backup,
                    before,
                    error: cause.to_string(),
                }))
            }
        }
    }

    /// The mutating part of a run. The store is dropped on return, releasing
    /// the connection before any restore.
    fn clean<S: CleanupStore>(
        &self,
        before: &mut Option<TableCounts>,
        progress: &mut dyn FnMut(Progress<'_>),
    ) -> Result<Cleaned> {
        let mut store = S::open(&self.database)?;

        let existing = store.existing_tables()?;
        let counts = TableCounts::collect(&existing, |table| store.count_rows(table))?;
        progress(Progress::Counted(&counts));
        *before = Some(counts.clone());

        let steps = self.plan.steps(&existing);
        store.apply(&steps, &mut |step| progress(Progress::Step(step)))?;

        progress(Progress::Vacuuming);
        store.vacuum()?;

        let existing = store.existing_tables()?;
        let after = TableCounts::collect(&existing, |table| store.count_rows(table))?;

        Ok(Cleaned {
            before: counts,
            after,
            steps,
        })
    }
}
