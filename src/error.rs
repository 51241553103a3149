use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Sanitizer errors that abort a run.
#[derive(Error, Debug)]
pub enum SanitizeError {
    #[error("database file '{}' not found", path.display())]
    DatabaseNotFound { path: PathBuf },

    #[error("backup verification failed for {}: expected {expected} bytes, found {actual}", path.display())]
    BackupMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("cleanup failed ({cause}) and restoring {} failed: {restore}", backup.display())]
    RestoreFailed {
        backup: PathBuf,
        cause: String,
        restore: String,
    },
}

/// Static server errors raised before the listener is running.
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Directory {} does not exist", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    #[error(transparent)]
    Serve(#[from] ServeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Database(err.to_string())
    }
}

impl From<diesel::ConnectionError> for Error {
    fn from(err: diesel::ConnectionError) -> Self {
        Error::Connection(err.to_string())
    }
}
