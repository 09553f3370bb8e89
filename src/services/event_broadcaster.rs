//! Event broadcaster for job lifecycle updates.
//!
//! Uses tokio::sync::broadcast to fan-out events to every subscriber.

use tokio::sync::broadcast;

use crate::config::defaults::EVENT_CHANNEL_CAPACITY;
use crate::models::{JobEvent, JobEventMessage};

/// Event broadcaster that distributes job events to all subscribers.
#[derive(Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<JobEventMessage>,
}

impl EventBroadcaster {
    /// Create a new EventBroadcaster with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(EVENT_CHANNEL_CAPACITY)
    }

    /// Create a new EventBroadcaster with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to receive events.
    /// Returns a receiver that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<JobEventMessage> {
        self.sender.subscribe()
    }

    /// Broadcast an event to all subscribers.
    /// Returns the number of receivers that received the event.
    /// If there are no subscribers, returns 0 (does not error).
    pub fn send(&self, event: JobEvent) -> usize {
        self.sender.send(JobEventMessage::new(event)).unwrap_or(0)
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
