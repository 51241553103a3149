//! Miette-based error diagnostics for CLI error presentation.
//!
//! Configuration parse errors are rendered with the offending TOML source,
//! a label at the failing span and a help line.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::settings::Config;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(phobos::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// Configuration file content.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

/// Load configuration from `path`, or defaults when no path is given.
///
/// Parse errors are printed as a miette report before being returned.
///
/// # Errors
/// Returns the underlying configuration error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    match Config::parse_toml(&content) {
        Err(Error::Config(ConfigError::Parse(err))) => {
            let diagnostic = parse_diagnostic(path, &content, &err);
            eprintln!("{:?}", miette::Report::new(diagnostic));
            Err(ConfigError::Parse(err).into())
        }
        other => other,
    }
}

/// Build a diagnostic pointing at the span of a TOML parse error.
#[must_use]
pub fn parse_diagnostic(path: &Path, content: &str, err: &toml::de::Error) -> ConfigDiagnostic {
    let span = err
        .span()
        .map(|range| SourceSpan::from((range.start, range.end.saturating_sub(range.start))))
        .unwrap_or_else(|| SourceSpan::from((0, 0)));

    ConfigDiagnostic {
        message: format!("invalid configuration file {}", path.display()),
        src: NamedSource::new(path.display().to_string(), content.to_string()),
        span,
        help: Some(err.message().to_string()),
    }
}
