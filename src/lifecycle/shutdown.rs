//! Shutdown request channel between the coordinator and the listener task.

use tokio::sync::watch;

/// Single-shot graceful shutdown request.
///
/// The listener task holds a receiver; triggering flips it to `true` once.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Receiver for the listener task.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Request graceful shutdown. Later calls are no-ops.
    pub fn trigger(&self) {
        self.tx.send_if_modified(|requested| !std::mem::replace(requested, true));
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
