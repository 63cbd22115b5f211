//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the configured responder (host name, absolute root path)
//! - Announce the selected mode
//! - Build the HTTP server with access logging injected
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Nothing is bound here; the coordinator starts the listener

use tracing::Dispatch;

use crate::config::ServerConfig;
use crate::http::{HttpServer, Responder, StartupError};

/// Prepare the server described by `config`.
pub fn prepare(config: &ServerConfig, dispatch: Dispatch) -> Result<HttpServer, StartupError> {
    let responder = Responder::from_config(&config.mode).inspect_err(|e| {
        tracing::error!(error = %e, "{}", e.message());
    })?;
    responder.announce();
    Ok(HttpServer::new(responder, dispatch))
}
