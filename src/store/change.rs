//! Store change feed
//!
//! An explicit publish/subscribe channel the store exposes and query
//! surfaces subscribe to, replacing any ambient "data changed" global
//! event. Delivery is best-effort: a subscriber that has gone away is
//! dropped on the next publish.

use std::collections::HashMap;
use std::sync::RwLock;

use tokio::sync::mpsc;

/// What changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
    Imported,
}

/// One store change notification
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// Collection the change touched
    pub record_type: String,
    /// Kind of change
    pub kind: ChangeKind,
    /// Number of records affected
    pub count: usize,
}

/// Receiver half of a subscription
pub type ChangeReceiver = mpsc::UnboundedReceiver<ChangeEvent>;

/// Fan-out hub for store change events
#[derive(Debug, Default)]
pub struct ChangeHub {
    subscribers: RwLock<HashMap<String, mpsc::UnboundedSender<ChangeEvent>>>,
}

impl ChangeHub {
    /// Creates an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber under an ID, returning its receiver.
    /// Re-subscribing under the same ID replaces the old channel.
    pub fn subscribe(&self, subscriber_id: impl Into<String>) -> ChangeReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.subscribers.write() {
            subscribers.insert(subscriber_id.into(), tx);
        }
        rx
    }

    /// Removes a subscriber
    pub fn unsubscribe(&self, subscriber_id: &str) {
        if let Ok(mut subscribers) = self.subscribers.write() {
            subscribers.remove(subscriber_id);
        }
    }

    /// Publishes an event to every live subscriber, pruning dead ones
    pub fn publish(&self, event: &ChangeEvent) {
        let Ok(mut subscribers) = self.subscribers.write() else {
            return;
        };
        subscribers.retain(|_, tx| tx.send(event.clone()).is_ok());
    }

    /// Current subscriber count
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().map(|s| s.len()).unwrap_or(0)
    }
}
