//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (net/)
//!     → server.rs (axum accept loop, graceful drain)
//!     → access_log.rs (timing, one record per request)
//!         → request.rs (resolve X-Request-Id)
//!         → response.rs (capture status)
//!     → responders.rs (hello / hostname / file server)
//! ```

pub mod access_log;
pub mod request;
pub mod responders;
pub mod response;
pub mod server;

pub use access_log::{AccessLog, AccessLogLayer};
pub use request::{resolve_request_id, RequestId, RequestIdExt, X_REQUEST_ID};
pub use responders::{Responder, StartupError};
pub use response::StatusCapture;
pub use server::HttpServer;
