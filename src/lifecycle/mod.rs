//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve responder → Announce mode → Build server
//!
//! Coordinator (coordinator.rs):
//!     Spawn listener task ─┬─ listener result → fatal, exit 1
//!                          └─ termination signal → drain (bounded) → bye
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Only the signal branch shuts down gracefully; any other listener exit is fatal
//! - Shutdown has a deadline: overrunning it is fatal

pub mod coordinator;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use coordinator::{run_until_terminated, LifecycleError};
pub use shutdown::Shutdown;
pub use signals::{Signals, TerminationSignal};
pub use startup::prepare;

/// Server lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Running,
    ShuttingDown,
    Stopped,
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LifecycleState::Starting => "starting",
            LifecycleState::Running => "running",
            LifecycleState::ShuttingDown => "shutting_down",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
