//! Listener supervision.
//!
//! Races the listener task against the termination signal. The listener
//! task is the single-shot error channel: whatever it returns, it returns
//! once. The signal future is the other.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::http::HttpServer;
use crate::lifecycle::{LifecycleState, Shutdown, TerminationSignal};
use crate::net::ListenerError;
use crate::observability::non_empty;

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// The listener ended without a shutdown request.
    #[error(transparent)]
    Listen(ListenerError),

    /// Draining failed.
    #[error(transparent)]
    Shutdown(ListenerError),

    /// In-flight requests outlived the deadline.
    #[error("context deadline exceeded after {0:?}")]
    ShutdownTimeout(Duration),
}

struct StateMachine {
    state: LifecycleState,
}

impl StateMachine {
    fn new() -> Self {
        Self {
            state: LifecycleState::Starting,
        }
    }

    fn advance(&mut self, next: LifecycleState) {
        tracing::debug!(from = %self.state, to = %next, "lifecycle transition");
        self.state = next;
    }
}

/// Serve on `bind_address` until `termination` resolves, then drain
/// in-flight requests for at most `shutdown_timeout`.
///
/// Logs `start`, `catch signal` and `bye`, and logs every failure before
/// returning it.
pub async fn run_until_terminated<F>(
    server: HttpServer,
    bind_address: String,
    termination: F,
    shutdown_timeout: Duration,
) -> Result<(), LifecycleError>
where
    F: Future<Output = TerminationSignal>,
{
    let mut machine = StateMachine::new();
    let shutdown = Shutdown::new();

    let mut listener = tokio::spawn(server.run(bind_address.clone(), shutdown.subscribe()));
    tracing::info!(addr = non_empty(&bind_address), "start");
    machine.advance(LifecycleState::Running);

    tokio::select! {
        result = &mut listener => {
            let err = listener_outcome(result).err().unwrap_or(ListenerError::Stopped);
            tracing::error!(error = %err, "failed to listen");
            machine.advance(LifecycleState::Stopped);
            Err(LifecycleError::Listen(err))
        }
        signal = termination => {
            tracing::info!(signal = %signal, "catch signal");
            machine.advance(LifecycleState::ShuttingDown);
            shutdown.trigger();

            drain(listener, shutdown_timeout).await.inspect_err(|e| {
                tracing::error!(error = %e, "failed to shutdown");
                machine.advance(LifecycleState::Stopped);
            })?;

            machine.advance(LifecycleState::Stopped);
            tracing::info!("bye");
            Ok(())
        }
    }
}

async fn drain(
    mut listener: JoinHandle<Result<(), ListenerError>>,
    deadline: Duration,
) -> Result<(), LifecycleError> {
    match tokio::time::timeout(deadline, &mut listener).await {
        Ok(result) => listener_outcome(result).map_err(LifecycleError::Shutdown),
        Err(_) => {
            listener.abort();
            Err(LifecycleError::ShutdownTimeout(deadline))
        }
    }
}

fn listener_outcome(
    result: Result<Result<(), ListenerError>, tokio::task::JoinError>,
) -> Result<(), ListenerError> {
    match result {
        Ok(outcome) => outcome,
        Err(join) => Err(ListenerError::Task(join.to_string())),
    }
}
