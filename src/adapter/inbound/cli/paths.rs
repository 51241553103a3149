//! Default locations for the sanitizer.
//!
//! The database and backup directory live next to the installed executable:
//! - `<exe dir>/phobos-bot.db` - bot database
//! - `<exe dir>/backups/` - timestamped backups

use std::path::{Path, PathBuf};

use crate::infrastructure::config::settings::{DEFAULT_BACKUP_DIR, DEFAULT_DATABASE_FILE};

/// Returns the directory containing the running executable.
///
/// Falls back to the current directory when it cannot be determined.
pub fn base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default database path under `base`.
pub fn default_database(base: &Path) -> PathBuf {
    base.join(DEFAULT_DATABASE_FILE)
}

/// Returns the default backup directory under `base`.
pub fn default_backup_dir(base: &Path) -> PathBuf {
    base.join(DEFAULT_BACKUP_DIR)
}

/// Pick the first of a CLI flag, a config value, or the default.
pub fn choose(flag: Option<&Path>, configured: Option<&Path>, default: PathBuf) -> PathBuf {
    flag.or(configured)
        .map(Path::to_path_buf)
        .unwrap_or(default)
}
