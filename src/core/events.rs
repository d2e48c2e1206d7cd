//! Change notifications for record collections
//!
//! Record sources publish a [`StoreEvent`] whenever a collection is written
//! out-of-band (another session registering a facility, for example). The
//! view controller listens and reloads when the changed collection is the
//! one it renders.
//!
//! # Architecture
//!
//! ```text
//! Registration flow ──▶ RecordSource::write ──▶ EventBus::publish() ──▶ broadcast channel
//!                                                                          │
//!                                 ChangeListener::next_change() ◀──────────┘
//!                                                 │
//!                                                 ▼
//!                               ViewSyncController::on_store_change()
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = EventBus::new(64);
//! let mut rx = bus.subscribe();
//!
//! bus.publish(StoreEvent::Changed { collection: "ordo_facilities".to_string() });
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("collection changed: {:?}", envelope.event.collection());
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use uuid::Uuid;

/// Events emitted by record sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A collection's content was replaced
    Changed { collection: String },
    /// A collection was removed entirely
    Cleared { collection: String },
}

impl StoreEvent {
    /// The collection this event relates to
    pub fn collection(&self) -> &str {
        match self {
            StoreEvent::Changed { collection } | StoreEvent::Cleared { collection } => collection,
        }
    }

    /// Get the action name (changed, cleared)
    pub fn action(&self) -> &str {
        match self {
            StoreEvent::Changed { .. } => "changed",
            StoreEvent::Cleared { .. } => "cleared",
        }
    }
}

/// Envelope wrapping a store event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: StoreEvent,
}

impl EventEnvelope {
    pub fn new(event: StoreEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus for store notifications
///
/// Cheap to clone; every clone publishes into the same channel. Dropping a
/// receiver revokes that subscription.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Receivers that fall more than `capacity` events behind observe a
    /// `Lagged` error on their next receive.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Returns the number of receivers that will see the event
    /// (zero when nobody is listening).
    pub fn publish(&self, event: StoreEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to future events
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Waits for changes to one collection
///
/// Events for other collections are skipped. A lagged receiver reports a
/// change, since whatever it missed may have touched the collection.
/// Dropping the listener revokes its subscription.
pub struct ChangeListener {
    collection: String,
    stream: BroadcastStream<EventEnvelope>,
}

impl ChangeListener {
    pub fn new(bus: &EventBus, collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            stream: BroadcastStream::new(bus.subscribe()),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Resolve on the next relevant change, or `None` once the bus is closed
    pub async fn next_change(&mut self) -> Option<StoreEvent> {
        while let Some(item) = self.stream.next().await {
            match item {
                Ok(envelope) if envelope.event.collection() == self.collection => {
                    return Some(envelope.event);
                }
                Ok(_) => continue,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        collection = %self.collection,
                        skipped,
                        "Change listener lagged, assuming the collection changed"
                    );
                    return Some(StoreEvent::Changed {
                        collection: self.collection.clone(),
                    });
                }
            }
        }
        None
    }
}
