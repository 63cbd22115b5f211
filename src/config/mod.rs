//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (ServerConfig::default)
//!     → loader.rs (optional TOML file)
//!     → TEXT environment variable
//!     → command-line flags (cli.rs)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the server runs with no config at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, ModeConfig, ModeKind, ObservabilityConfig, ServerConfig, ShutdownConfig};
pub use validation::{validate_config, ValidationError};
