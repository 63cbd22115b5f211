//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! access log middleware (http/access_log.rs)  ─┐
//! lifecycle coordinator (lifecycle/)          ─┼→ logging.rs (JSON lines on stdout)
//! startup (lifecycle/startup.rs)              ─┘
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows into every access log record
//! - Empty string attributes are never written

pub mod logging;

pub use logging::{build_dispatch, init, non_empty, LoggingError};
