use std::process::ExitCode;

use clap::Parser;
use tracing::Dispatch;

use testhttpserver::cli::Cli;
use testhttpserver::config::ServerConfig;
use testhttpserver::lifecycle::{self, Signals};
use testhttpserver::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Cli::parse().into_config();

    // Invalid configs still get a logger so the failure is reported as JSON.
    let level = config
        .as_ref()
        .map(|c| c.observability.log_level.as_str())
        .unwrap_or("info");
    let dispatch = match logging::init(level) {
        Ok(dispatch) => dispatch,
        Err(e) => {
            eprintln!("testhttpserver: failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(config, dispatch).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

/// Every failure is logged where it happens; only the outcome comes back.
async fn run(config: ServerConfig, dispatch: Dispatch) -> Result<(), ()> {
    let server = lifecycle::prepare(&config, dispatch).map_err(|_| ())?;

    let signals = Signals::install().map_err(|e| {
        tracing::error!(error = %e, "failed to install signal handlers");
    })?;

    lifecycle::run_until_terminated(
        server,
        config.listener.bind_address.clone(),
        signals.recv(),
        config.shutdown.timeout(),
    )
    .await
    .map_err(|_| ())
}
