//! TCP listener setup.
//!
//! # Responsibilities
//! - Check the `host:port` shape of the bind address
//! - Resolve host names and bind the socket
//! - Describe listener failures
//!
//! # Design Decisions
//! - A host-less `":PORT"` binds the IPv6 wildcard (dual-stack where the
//!   kernel allows it) and falls back to `0.0.0.0` when IPv6 is unavailable

use tokio::net::TcpListener;

/// Error type for listener operations. Every variant is fatal.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// Bind address is not of the form `host:port`.
    #[error("address {address}: {reason}")]
    Address { address: String, reason: String },

    /// Failed to bind to address.
    #[error("listen tcp {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed.
    #[error("serve: {0}")]
    Serve(#[source] std::io::Error),

    /// The accept loop returned without a shutdown request.
    #[error("listener stopped unexpectedly")]
    Stopped,

    /// The listener task panicked or was cancelled.
    #[error("listener task failed: {0}")]
    Task(String),
}

/// Check that `address` looks like `host:port`, `[v6]:port` or `:port`.
/// Host names are resolved at bind time, not here.
pub fn check_address(address: &str) -> Result<(), String> {
    let (host, port) = address.rsplit_once(':').ok_or("missing port in address")?;
    port.parse::<u16>()
        .map_err(|_| format!("invalid port {:?}", port))?;

    let bracketed = host.starts_with('[') || host.ends_with(']');
    if bracketed && !(host.starts_with('[') && host.ends_with(']')) {
        return Err("mismatched brackets in address".to_string());
    }
    if !bracketed && host.contains(':') {
        return Err("too many colons in address".to_string());
    }
    Ok(())
}

/// Addresses to try, in order, for `address`.
pub fn bind_candidates(address: &str) -> Vec<String> {
    match address.strip_prefix(':') {
        Some(port) => vec![format!("[::]:{}", port), format!("0.0.0.0:{}", port)],
        None => vec![address.to_string()],
    }
}

/// Bind to `address`, resolving host names.
pub async fn bind(address: &str) -> Result<TcpListener, ListenerError> {
    check_address(address).map_err(|reason| ListenerError::Address {
        address: address.to_string(),
        reason,
    })?;

    let mut last_error = None;
    for candidate in bind_candidates(address) {
        match TcpListener::bind(candidate.as_str()).await {
            Ok(listener) => {
                if let Ok(local_addr) = listener.local_addr() {
                    tracing::debug!(address = %local_addr, "Listener bound");
                }
                return Ok(listener);
            }
            // A taken port is final; anything else may just mean no IPv6.
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                last_error = Some(e);
                break;
            }
            Err(e) => last_error = Some(e),
        }
    }

    let source = last_error.unwrap_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "no address to bind")
    });
    Err(ListenerError::Bind {
        address: address.to_string(),
        source,
    })
}
