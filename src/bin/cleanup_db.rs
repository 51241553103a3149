use std::process::ExitCode;

use phobos_tools::adapter::inbound::cli::cleanup;
use phobos_tools::adapter::inbound::cli::command::{parse_or_exit, CleanupCli};
use phobos_tools::adapter::inbound::cli::startup;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match parse_or_exit::<CleanupCli>() {
        Ok(cli) => cli,
        Err(status) => return ExitCode::from(status),
    };

    let Some(config) = startup::start(&cli.global) else {
        return ExitCode::FAILURE;
    };

    ExitCode::from(cleanup::execute(&cli, &config))
}
