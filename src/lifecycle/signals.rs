//! OS signal handling.
//!
//! # Responsibilities
//! - Register SIGINT and SIGTERM handlers before the server starts
//! - Resolve to whichever arrives first
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Both signals mean the same thing: graceful shutdown
//! - Only the first signal is consulted

use tokio::signal::unix::{signal, Signal, SignalKind};

/// Signal that triggered shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

impl std::fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationSignal::Interrupt => f.write_str("SIGINT"),
            TerminationSignal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Installed SIGINT/SIGTERM handlers.
pub struct Signals {
    interrupt: Signal,
    terminate: Signal,
}

impl Signals {
    /// Install the handlers. From here on the signals no longer kill the
    /// process.
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for the first termination signal.
    pub async fn recv(mut self) -> TerminationSignal {
        tokio::select! {
            Some(()) = self.interrupt.recv() => TerminationSignal::Interrupt,
            Some(()) = self.terminate.recv() => TerminationSignal::Terminate,
            else => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::{raise, Signal as NixSignal};
    use std::time::Duration;

    #[test]
    fn names_match_unix_signals() {
        assert_eq!(TerminationSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(TerminationSignal::Terminate.to_string(), "SIGTERM");
    }

    #[tokio::test]
    async fn sigterm_resolves_to_terminate() {
        let signals = Signals::install().unwrap();
        raise(NixSignal::SIGTERM).unwrap();

        let received = tokio::time::timeout(Duration::from_secs(5), signals.recv())
            .await
            .unwrap();
        assert_eq!(received, TerminationSignal::Terminate);
    }
}
