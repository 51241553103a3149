//! Database access port for the sanitizer.

use std::path::Path;

use crate::domain::cleanup::CleanupStep;
use crate::domain::table::ExistingTables;
use crate::error::Result;

/// Port for the database being sanitized.
///
/// A store holds an open connection for its whole lifetime. Dropping it
/// releases the connection, which must happen before the database file is
/// overwritten from a backup.
pub trait CleanupStore: Sized {
    /// Open the database at `path`. The file must already exist.
    fn open(path: &Path) -> Result<Self>;

    /// Fold any pending write-ahead log into the main database file so a
    /// plain file copy holds every committed transaction.
    fn checkpoint(&mut self) -> Result<()>;

    /// Names of all tables in the database.
    fn existing_tables(&mut self) -> Result<ExistingTables>;

    /// Number of rows in `table`.
    fn count_rows(&mut self, table: &str) -> Result<i64>;

    /// Execute `steps` in a single transaction.
    ///
    /// `on_step` is called before each step runs. On error nothing is
    /// committed.
    fn apply(&mut self, steps: &[CleanupStep], on_step: &mut dyn FnMut(&CleanupStep))
        -> Result<()>;

    /// Rewrite the database file to reclaim free pages.
    fn vacuum(&mut self) -> Result<()>;
}
