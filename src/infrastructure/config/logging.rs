//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Target of per-request access log events.
pub const ACCESS_LOG_TARGET: &str = "phobos_tools::access";

/// Logging configuration.
///
/// Logs always go to stderr; stdout is reserved for reports.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Override the level, e.g. from `-v` flags.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Filter for the configured level. `RUST_LOG` takes precedence, and the
    /// access log stays at `info` whatever the level.
    #[must_use]
    pub fn filter(&self) -> EnvFilter {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        match format!("{ACCESS_LOG_TARGET}=info").parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        }
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Calling this more than once keeps the first subscriber.
    pub fn init(&self) {
        let filter = self.filter();

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        if result.is_err() {
            tracing::debug!("Logging already initialized");
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

/// Level implied by `-q`/`-v` flags, if any.
#[must_use]
pub fn level_for_verbosity(quiet: bool, verbose: u8) -> Option<&'static str> {
    match (quiet, verbose) {
        (true, _) => Some("error"),
        (false, 0) => None,
        (false, 1) => Some("debug"),
        (false, _) => Some("trace"),
    }
}
