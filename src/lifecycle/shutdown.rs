//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcasts a single stop request to every long-running task.
///
/// Receivers observe the trigger, or the coordinator being dropped, as a
/// signal to stop; keep the `Shutdown` alive for as long as the tasks run.
#[derive(Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
