//! Record sources and the facility store adapter

use crate::core::error::StorageError;
use crate::core::facility::Facility;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Read access to an external record collection
///
/// Implementations must not modify the source while reading; `read_all`
/// may be called any number of times.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Read every raw record of a named collection
    ///
    /// A collection that does not exist reads as empty.
    async fn read_all(&self, collection: &str) -> Result<Vec<Value>>;
}

/// Parse a serialized collection.
///
/// Anything that is valid JSON but not an array reads as an empty
/// collection. Invalid JSON is a read failure.
pub fn parse_collection(collection: &str, raw: &str) -> Result<Vec<Value>, StorageError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| StorageError::ReadFailed {
        collection: collection.to_string(),
        message: e.to_string(),
    })?;

    match value {
        Value::Array(records) => Ok(records),
        _ => Ok(Vec::new()),
    }
}

/// Tolerant adapter turning raw records into the working set
///
/// Records without a usable coordinate are dropped, and a source that fails
/// to read yields an empty set. Neither case is reported to the caller.
#[derive(Clone)]
pub struct FacilityStore {
    source: Arc<dyn RecordSource>,
    collection: String,
}

impl FacilityStore {
    pub fn new(source: Arc<dyn RecordSource>, collection: impl Into<String>) -> Self {
        Self {
            source,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Load and normalize the collection
    pub async fn load(&self) -> Vec<Arc<Facility>> {
        let records = match self.source.read_all(&self.collection).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    collection = %self.collection,
                    error = %e,
                    "Failed to read facility collection, treating it as empty"
                );
                return Vec::new();
            }
        };

        let total = records.len();
        let facilities: Vec<Arc<Facility>> = records
            .iter()
            .filter_map(Facility::from_record)
            .map(Arc::new)
            .collect();

        let dropped = total - facilities.len();
        if dropped > 0 {
            tracing::warn!(
                collection = %self.collection,
                dropped,
                "Dropped facility records without valid coordinates"
            );
        }

        facilities
    }
}
