//! Shared startup for both binaries: output mode, configuration, logging.

use crate::adapter::inbound::cli::command::GlobalArgs;
use crate::adapter::inbound::cli::diagnostic;
use crate::adapter::inbound::cli::output::{self, OutputConfig};
use crate::error::{ConfigError, Error};
use crate::infrastructure::config::logging::level_for_verbosity;
use crate::infrastructure::config::settings::Config;

/// Apply global flags and load configuration.
///
/// Returns `None` after reporting the problem when the configuration
/// cannot be loaded.
pub fn start(global: &GlobalArgs) -> Option<Config> {
    output::configure(OutputConfig::new(global.json, global.quiet, global.color));

    let config = match diagnostic::load_config(global.config.as_deref()) {
        Ok(config) => config,
        // Already rendered as a miette report.
        Err(Error::Config(ConfigError::Parse(_))) => return None,
        Err(e) => {
            output::error(&e.to_string());
            return None;
        }
    };

    let logging = match level_for_verbosity(global.quiet, global.verbose) {
        Some(level) => config.logging.clone().with_level(level),
        None => config.logging.clone(),
    };
    logging.init();

    Some(config)
}
