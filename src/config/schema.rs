//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the hello-mode response body.
pub const TEXT_ENV: &str = "TEXT";

/// Root configuration for the test server.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Which responder serves requests.
    pub mode: ModeConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServerConfig {
    /// Apply the `TEXT` environment variable. Unset or empty leaves the
    /// configured text alone.
    pub fn apply_env(&mut self) {
        self.apply_text_override(std::env::var(TEXT_ENV).ok());
    }

    fn apply_text_override(&mut self, text: Option<String>) {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            self.mode.text = text;
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (`host:port`). A host-less `":8080"` listens on all
    /// interfaces; host names are resolved at bind time.
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: ":8080".to_string(),
        }
    }
}

/// Responder kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    /// Static text body.
    Hello,
    /// The machine's host name.
    Hostname,
    /// Files under `root_dir`.
    #[default]
    FileServer,
}

/// Responder configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    pub kind: ModeKind,

    /// Body returned in hello mode.
    pub text: String,

    /// Root directory in file server mode.
    pub root_dir: PathBuf,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            kind: ModeKind::FileServer,
            text: "hello".to_string(),
            root_dir: PathBuf::from("."),
        }
    }
}

/// Graceful shutdown configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Deadline for in-flight requests once a termination signal arrives.
    pub timeout_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

impl ShutdownConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter (trace, debug, info, warn, error or a full directive).
    /// `RUST_LOG` takes precedence when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
