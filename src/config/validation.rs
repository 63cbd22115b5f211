//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0, address has a `host:port` shape)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>

use tracing_subscriber::EnvFilter;

use crate::config::schema::ServerConfig;
use crate::net::check_address;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address {address:?}: {reason}")]
    BindAddress { address: String, reason: String },

    #[error("shutdown timeout must be greater than zero")]
    ShutdownTimeout,

    #[error("invalid log level {level:?}: {reason}")]
    LogLevel { level: String, reason: String },
}

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(reason) = check_address(&config.listener.bind_address) {
        errors.push(ValidationError::BindAddress {
            address: config.listener.bind_address.clone(),
            reason,
        });
    }

    if config.shutdown.timeout_secs == 0 {
        errors.push(ValidationError::ShutdownTimeout);
    }

    if let Err(e) = EnvFilter::try_new(&config.observability.log_level) {
        errors.push(ValidationError::LogLevel {
            level: config.observability.log_level.clone(),
            reason: e.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
