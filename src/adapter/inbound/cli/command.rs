//! Command-line interface definitions.
//!
//! Both binaries are declared here with `clap`. They share the global output
//! flags; everything else is specific to each tool.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser};

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Output flags accepted by both tools.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Color output mode [auto, always, never]
    #[arg(long, default_value = "auto", hide_possible_values = true)]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to an optional TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Back up the phobos bot database, then delete user data and blank secrets
#[derive(Parser, Debug)]
#[command(name = "cleanup-db")]
#[command(version, about)]
pub struct CleanupCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Database file [default: phobos-bot.db next to the executable]
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Backup directory [default: backups/ next to the executable]
    #[arg(long)]
    pub backup_dir: Option<PathBuf>,

    /// Show row counts and planned steps without backing up or modifying anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Serve one directory over HTTP with directory listing disabled
#[derive(Parser, Debug)]
#[command(name = "phobos-http-server")]
#[command(version, about)]
pub struct ServerCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// TCP port to listen on
    pub port: u16,

    /// Directory to serve
    pub directory: PathBuf,

    /// Interface to bind [default: 0.0.0.0]
    #[arg(long)]
    pub bind: Option<String>,
}

/// Exit status for usage errors such as a wrong argument count.
pub const USAGE_EXIT_STATUS: u8 = 1;

/// Parse process arguments, or the exit status to stop with.
///
/// Usage errors print clap's message and yield [`USAGE_EXIT_STATUS`];
/// `--help` and `--version` print and yield 0.
pub fn parse_or_exit<T: Parser>() -> Result<T, u8> {
    parse_from_or_exit(std::env::args_os())
}

/// [`parse_or_exit`] over explicit arguments.
pub fn parse_from_or_exit<T, I, A>(args: I) -> Result<T, u8>
where
    T: Parser,
    I: IntoIterator<Item = A>,
    A: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Err(0),
                _ => Err(USAGE_EXIT_STATUS),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cleanup_cli_needs_no_arguments() {
        let cli = CleanupCli::try_parse_from(["cleanup-db"]).unwrap();
        assert!(cli.db.is_none());
        assert!(cli.backup_dir.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.global.json);
        assert_eq!(cli.global.verbose, 0);
    }

    #[test]
    fn cleanup_cli_accepts_overrides() {
        let cli = CleanupCli::try_parse_from([
            "cleanup-db",
            "--db",
            "/data/bot.db",
            "--backup-dir",
            "/data/backups",
            "--dry-run",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/data/bot.db")));
        assert_eq!(cli.backup_dir, Some(PathBuf::from("/data/backups")));
        assert!(cli.dry_run);
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn server_cli_takes_port_and_directory() {
        let cli = ServerCli::try_parse_from(["phobos-http-server", "8080", "/srv/www"]).unwrap();
        assert_eq!(cli.port, 8080);
        assert_eq!(cli.directory, PathBuf::from("/srv/www"));
        assert!(cli.bind.is_none());
    }

    #[test]
    fn server_cli_rejects_wrong_argument_count() {
        assert!(ServerCli::try_parse_from(["phobos-http-server", "8080"]).is_err());
        assert!(ServerCli::try_parse_from(["phobos-http-server", "8080", "a", "b"]).is_err());
    }

    #[test]
    fn server_cli_rejects_invalid_port() {
        assert!(ServerCli::try_parse_from(["phobos-http-server", "http", "/srv"]).is_err());
        assert!(ServerCli::try_parse_from(["phobos-http-server", "70000", "/srv"]).is_err());
    }

    #[test]
    fn usage_errors_map_to_failure() {
        let result = parse_from_or_exit::<ServerCli, _, _>(["phobos-http-server"]);
        assert_eq!(result.unwrap_err(), USAGE_EXIT_STATUS);
    }

    #[test]
    fn help_maps_to_success() {
        let result = parse_from_or_exit::<ServerCli, _, _>(["phobos-http-server", "--help"]);
        assert_eq!(result.unwrap_err(), 0);
    }

    #[test]
    fn color_flag_parses() {
        let cli = CleanupCli::try_parse_from(["cleanup-db", "--color", "never"]).unwrap();
        assert!(matches!(cli.global.color, ColorChoice::Never));
    }

    #[test]
    fn commands_are_well_formed() {
        CleanupCli::command().debug_assert();
        ServerCli::command().debug_assert();
    }
}
