//! Tool configuration loading and validation.
//!
//! Both binaries accept an optional TOML file. Every section and field is
//! defaulted, so an empty file (or no file at all) is a valid configuration.
//! Command-line flags are applied on top by the CLI layer.
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "pretty"   # or "json"
//!
//! [sanitizer]
//! database = "/var/lib/phobos/phobos-bot.db"
//! backup_dir = "/var/lib/phobos/backups"
//!
//! [server]
//! bind = "0.0.0.0"
//! index_file = "index.html"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::domain::site::DEFAULT_INDEX_FILE;
use crate::error::{ConfigError, Result};

/// Default database file name, resolved next to the executable.
pub const DEFAULT_DATABASE_FILE: &str = "phobos-bot.db";

/// Default backup directory name, resolved next to the executable.
pub const DEFAULT_BACKUP_DIR: &str = "backups";

/// Default interface for the static server.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Top-level configuration shared by both tools.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub sanitizer: SanitizerConfig,
    pub server: ServerConfig,
}

/// Sanitizer paths; unset values fall back to executable-relative defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    pub database: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
}

/// Static server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub index_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDRESS.to_string(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::InvalidValue` for values that fail validation.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        if let Some(database) = &self.sanitizer.database {
            if database.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "sanitizer.database",
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }
        let index = self.server.index_file.trim();
        if index.is_empty() || index.contains('/') || index.contains('\\') {
            return Err(ConfigError::InvalidValue {
                field: "server.index_file",
                reason: "must be a plain file name".to_string(),
            }
            .into());
        }
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.bind",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
