//! Diagnostic HTTP server for network and infrastructure smoke tests.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────────────────────────────────────────┐
//!     ───────────────────▶│ net listener → http server                   │
//!                         │      → access log (X-Request-Id, timing)     │
//!                         │          → responder (hello|hostname|files)  │
//!     Client Response     │      ◀── status captured, one JSON record    │
//!     ◀───────────────────│                                              │
//!                         │ lifecycle: listener result ⟷ SIGINT/SIGTERM  │
//!                         └──────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
