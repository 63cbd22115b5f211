//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! bind address (":8080", "host:port" or "ip:port")
//!     → listener.rs (shape check, resolve, bind)
//!     → http/server.rs (accept loop via axum::serve)
//! ```
//!
//! # Design Decisions
//! - Binding happens inside the listener task, so a bind failure surfaces
//!   on the same channel as any later listener failure

pub mod listener;

pub use listener::{bind, bind_candidates, check_address, ListenerError};
