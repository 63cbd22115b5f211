//! HTTP server setup.
//!
//! # Responsibilities
//! - Wrap the selected responder with access logging
//! - Bind the listener and run the accept loop
//! - Stop accepting and drain in-flight requests when shutdown is requested
//!
//! # Design Decisions
//! - Binding happens in `run`, inside the listener task
//! - Draining is unbounded here; the lifecycle coordinator owns the deadline

use axum::Router;
use tokio::sync::watch;
use tracing::Dispatch;

use crate::http::access_log::AccessLogLayer;
use crate::http::responders::Responder;
use crate::net::{self, ListenerError};

/// HTTP server for a single responder.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server for `responder`, logging requests through `dispatch`.
    pub fn new(responder: Responder, dispatch: Dispatch) -> Self {
        Self::from_router(responder.into_router(), dispatch)
    }

    /// Create a server around an arbitrary router.
    pub fn from_router(router: Router, dispatch: Dispatch) -> Self {
        Self {
            router: router.layer(AccessLogLayer::new(dispatch)),
        }
    }

    /// The router with access logging applied.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind `bind_address` and serve until `shutdown` flips to `true`, then
    /// drain in-flight requests.
    pub async fn run(
        self,
        bind_address: String,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), ListenerError> {
        let listener = net::bind(&bind_address).await?;

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                // A dropped sender also counts as a shutdown request.
                let _ = shutdown.wait_for(|requested| *requested).await;
            })
            .await
            .map_err(ListenerError::Serve)?;

        tracing::debug!("HTTP server stopped");
        Ok(())
    }
}
