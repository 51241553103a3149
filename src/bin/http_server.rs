use std::process::ExitCode;

use phobos_tools::adapter::inbound::cli::command::{parse_or_exit, ServerCli};
use phobos_tools::adapter::inbound::cli::{serve, startup};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match parse_or_exit::<ServerCli>() {
        Ok(cli) => cli,
        Err(status) => return ExitCode::from(status),
    };

    let Some(config) = startup::start(&cli.global) else {
        return ExitCode::FAILURE;
    };

    ExitCode::from(serve::execute(&cli, &config).await)
}
