//! Handler for `phobos-http-server`.

use tokio::signal;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::ServerCli;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::http::server;
use crate::domain::site::ServedRoot;
use crate::error::ServeError;
use crate::infrastructure::config::settings::Config;

/// Serve until interrupted and return the process exit status.
pub async fn execute(cli: &ServerCli, config: &Config) -> u8 {
    if !cli.directory.is_dir() {
        let err = ServeError::MissingDirectory {
            path: cli.directory.clone(),
        };
        output::error(&format!("Error: {err}"));
        return 1;
    }

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            output::error(&format!("Error: cannot determine working directory: {e}"));
            return 1;
        }
    };
    let root = ServedRoot::new(&cli.directory, &cwd).with_index_file(&config.server.index_file);

    let addr = cli.bind.as_deref().unwrap_or(&config.server.bind);
    let listener = match server::bind(addr, cli.port).await {
        Ok(listener) => listener,
        Err(e) => {
            output::error(&format!("Error: {e}"));
            return 1;
        }
    };

    output::header("Phobos HTTP Server", env!("CARGO_PKG_VERSION"));
    output::field("Serving at port", cli.port);
    output::field("Directory", root.path().display());
    output::field("Directory listing", "DISABLED");
    output::hint("press Ctrl+C to stop");

    if let Err(e) = server::serve(listener, root, shutdown_signal()).await {
        output::error(&format!("Error: {e}"));
        return 1;
    }

    output::success("Server stopped.");
    0
}

/// Resolve on the first interrupt signal.
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for interrupt; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
