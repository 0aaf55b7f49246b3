//! App-wide data change notifications.

use tokio::sync::broadcast;

/// Data change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEvent {
    /// All body and exercise records were removed.
    Cleared,
}

/// Broadcast bus for [`DataEvent`]s.
#[derive(Debug, Clone)]
pub struct DataEvents {
    event_tx: broadcast::Sender<DataEvent>,
}

impl Default for DataEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl DataEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { event_tx: tx }
    }

    /// Subscribe to data events.
    pub fn subscribe(&self) -> broadcast::Receiver<DataEvent> {
        self.event_tx.subscribe()
    }

    /// Publish an event. Returns the number of subscribers reached.
    pub fn publish(&self, event: DataEvent) -> usize {
        match self.event_tx.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::debug!("No subscribers for {:?}", event);
                0
            }
        }
    }
}
