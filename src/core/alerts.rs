use log::debug;
use tokio::sync::broadcast;

/// Fan-out channel for busy-status messages emitted while long-running admin
/// operations (connecting, deploying) are in flight.
///
/// Cloning is cheap: clones share the same underlying channel, so any UI can
/// hold a copy and subscribe. Sending with no subscribers is not an error.
#[derive(Debug, Clone)]
pub struct AlertService {
    busy_tx: broadcast::Sender<String>,
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertService {
    pub fn new() -> Self {
        let (busy_tx, _) = broadcast::channel(16);
        Self { busy_tx }
    }

    /// Subscribe to busy-status messages.
    pub fn subscribe_busy(&self) -> broadcast::Receiver<String> {
        self.busy_tx.subscribe()
    }

    /// Publish a busy-status message to all subscribers.
    pub fn busy(&self, message: impl Into<String>) {
        let message = message.into();
        debug!("Busy status: {}", message);
        let _ = self.busy_tx.send(message);
    }
}
