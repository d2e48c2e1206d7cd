//! Record source backed by JSON files in a directory
//!
//! Each collection lives in `<dir>/<collection>.json` and holds the
//! serialized array of records.

use crate::core::error::StorageError;
use crate::core::events::{EventBus, StoreEvent};
use crate::core::store::{RecordSource, parse_collection};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct JsonFileRecordSource {
    dir: PathBuf,
    events: EventBus,
}

impl JsonFileRecordSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            events: EventBus::default(),
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    /// Replace a collection's file and notify listeners
    pub async fn write(&self, collection: &str, records: &[Value]) -> Result<(), StorageError> {
        let write_failed = |message: String| StorageError::WriteFailed {
            collection: collection.to_string(),
            message,
        };

        let raw = serde_json::to_string_pretty(records).map_err(|e| write_failed(e.to_string()))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| write_failed(e.to_string()))?;
        tokio::fs::write(self.path_for(collection), raw)
            .await
            .map_err(|e| write_failed(e.to_string()))?;

        tracing::debug!(collection, records = records.len(), "Collection written");

        self.events.publish(StoreEvent::Changed {
            collection: collection.to_string(),
        });
        Ok(())
    }
}

#[async_trait]
impl RecordSource for JsonFileRecordSource {
    async fn read_all(&self, collection: &str) -> Result<Vec<Value>> {
        let path = self.path_for(collection);

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    collection: collection.to_string(),
                    message: format!("{}: {}", path.display(), e),
                }
                .into());
            }
        };

        Ok(parse_collection(collection, &raw)?)
    }
}
