//! In-memory record source for testing and development

use crate::core::error::StorageError;
use crate::core::events::{EventBus, StoreEvent};
use crate::core::store::{RecordSource, parse_collection};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Named collections of serialized records, kept in memory
///
/// Mirrors a browser-style key/value store: each collection is one JSON
/// string. Every write publishes a [`StoreEvent`] on the source's bus.
#[derive(Clone)]
pub struct InMemoryRecordSource {
    collections: Arc<RwLock<HashMap<String, String>>>,
    events: EventBus,
}

impl InMemoryRecordSource {
    pub fn new() -> Self {
        Self::with_events(EventBus::default())
    }

    /// Create a source publishing on an existing bus
    pub fn with_events(events: EventBus) -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            events,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Store a collection's serialized content verbatim
    pub fn put_raw(&self, collection: &str, raw: impl Into<String>) -> Result<(), StorageError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        collections.insert(collection.to_string(), raw.into());
        drop(collections);

        self.events.publish(StoreEvent::Changed {
            collection: collection.to_string(),
        });
        Ok(())
    }

    /// Serialize and store a collection of records
    pub fn put(&self, collection: &str, records: &[Value]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records).map_err(|e| StorageError::WriteFailed {
            collection: collection.to_string(),
            message: e.to_string(),
        })?;
        self.put_raw(collection, raw)
    }

    /// Remove a collection
    pub fn remove(&self, collection: &str) -> Result<(), StorageError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        let existed = collections.remove(collection).is_some();
        drop(collections);

        if existed {
            self.events.publish(StoreEvent::Cleared {
                collection: collection.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryRecordSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn read_all(&self, collection: &str) -> Result<Vec<Value>> {
        let collections = self
            .collections
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        match collections.get(collection) {
            Some(raw) => Ok(parse_collection(collection, raw)?),
            None => Ok(Vec::new()),
        }
    }
}
