//! # Ordo Map
//!
//! The facility pipeline behind the Ordo public-service map: loads registered
//! facilities from a record collection, filters them by category, region and
//! free text, and keeps a map and a results list consistent with the result.
//!
//! ## Features
//!
//! - **Tolerant Loading**: records without usable coordinates are dropped silently
//! - **Conjunctive Filtering**: type AND region AND case-insensitive text match
//! - **Single Source of Truth**: markers, list and count come from one filtered set
//! - **Newest Highlight**: the most recently created facility gets emphasis
//! - **Index-Aligned Focus**: a list position resolves to its marker by identity
//! - **Proximity Count**: facilities near the user's location
//! - **Change Notifications**: reload when the record collection changes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ordo::prelude::*;
//!
//! let source = InMemoryRecordSource::new();
//! source.put("ordo_facilities", &records)?;
//!
//! let config = MapConfig::default_config();
//! let store = FacilityStore::new(Arc::new(source.clone()), config.collection_key.clone());
//! let mut controller = ViewSyncController::new(store, config);
//!
//! controller.subscribe_list(Box::new(my_list));
//! controller.reload().await;
//!
//! controller.set_query("spa");
//! println!("{} results", controller.result_count());
//! ```

pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Model ===
    pub use crate::core::{
        category::{Category, CategoryStyle, CategoryStyles},
        facility::{Coordinate, Facility},
        filter::{FilterState, SearchOptions, compute_filtered},
        projection::{InfoPanel, ListItem, MarkerDescriptor, ResultsList, project_markers},
        proximity::ProximityReporter,
    };

    // === Controller ===
    pub use crate::core::controller::{ViewSnapshot, ViewState, ViewSyncController};
    pub use crate::core::render::{ListRenderTarget, MapRenderTarget, SubscriptionId};

    // === Collaborators ===
    pub use crate::core::events::{ChangeListener, EventBus, StoreEvent};
    pub use crate::core::geolocation::{GeolocationProvider, LocationStatus, StaticGeolocation};
    pub use crate::core::store::{FacilityStore, RecordSource};

    // === Errors ===
    pub use crate::core::error::{ConfigError, GeolocationError, StorageError};

    // === Storage ===
    pub use crate::storage::{InMemoryRecordSource, JsonFileRecordSource};

    // === Config ===
    pub use crate::config::{CategoryConfig, MapConfig, ViewConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
