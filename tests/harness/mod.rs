//! Shared test harness for controller integration tests
//!
//! Provides recording render targets whose logs stay inspectable after the
//! target is boxed into the controller, a geolocation provider that never
//! answers, and fixture builders for raw facility records.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use ordo::prelude::*;
use serde_json::{Value, json};
use std::sync::Mutex;

pub const COLLECTION: &str = "ordo_facilities";

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A raw facility record with the fields the filter looks at
pub fn record(id: &str, kind: &str, wilaya: &str, lat: f64, lng: f64) -> Value {
    json!({
        "id": id,
        "name": format!("Facility {}", id),
        "type": kind,
        "wilaya": wilaya,
        "address": "",
        "lat": lat,
        "lng": lng
    })
}

/// Same as [`record`] with a creation timestamp
pub fn record_created(id: &str, created: &str) -> Value {
    let mut value = record(id, "عيادة", "الجزائر", 36.7, 3.05);
    value["created"] = json!(created);
    value
}

/// Source, store and controller wired together over one collection
pub struct Fixture {
    pub source: InMemoryRecordSource,
    pub controller: ViewSyncController,
}

impl Fixture {
    pub fn new(records: &[Value]) -> Self {
        Self::with_config(records, MapConfig::default_config())
    }

    pub fn with_config(records: &[Value], config: MapConfig) -> Self {
        let source = InMemoryRecordSource::new();
        source
            .put(&config.collection_key, records)
            .expect("fixture write");

        let store = FacilityStore::new(Arc::new(source.clone()), config.collection_key.clone());
        let controller = ViewSyncController::new(store, config);

        Self { source, controller }
    }

    pub async fn loaded(records: &[Value]) -> Self {
        let mut fixture = Self::new(records);
        fixture.controller.reload().await;
        fixture
    }
}

pub fn list_ids(snapshot: &ViewSnapshot) -> Vec<String> {
    snapshot
        .list
        .items()
        .iter()
        .map(|item| item.facility_id.clone())
        .collect()
}

pub fn marker_ids(snapshot: &ViewSnapshot) -> Vec<String> {
    snapshot
        .markers
        .iter()
        .map(|marker| marker.facility_id.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Recording render targets
// ---------------------------------------------------------------------------

/// Everything a map target was asked to do
#[derive(Debug, Default)]
pub struct MapLog {
    /// Facility ids of the markers currently drawn
    pub markers: Vec<String>,
    /// Id of the marker drawn with newest emphasis
    pub newest: Option<String>,
    pub clears: usize,
    pub views: Vec<(Coordinate, u8)>,
    pub opened: Vec<String>,
    pub user: Option<Coordinate>,
}

pub struct RecordingMap {
    log: Arc<Mutex<MapLog>>,
}

impl RecordingMap {
    pub fn new() -> (Self, Arc<Mutex<MapLog>>) {
        let log = Arc::new(Mutex::new(MapLog::default()));
        (Self { log: Arc::clone(&log) }, log)
    }
}

impl MapRenderTarget for RecordingMap {
    fn clear_markers(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.markers.clear();
        log.newest = None;
        log.clears += 1;
    }

    fn add_marker(&mut self, marker: &MarkerDescriptor) {
        let mut log = self.log.lock().unwrap();
        if marker.is_newest {
            log.newest = Some(marker.facility_id.clone());
        }
        log.markers.push(marker.facility_id.clone());
    }

    fn open_info_panel(&mut self, marker: &MarkerDescriptor) {
        self.log.lock().unwrap().opened.push(marker.facility_id.clone());
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.log.lock().unwrap().views.push((center, zoom));
    }

    fn show_user_location(&mut self, position: Coordinate) {
        self.log.lock().unwrap().user = Some(position);
    }
}

/// Everything a list target was asked to do
#[derive(Debug, Default)]
pub struct ListLog {
    /// Ids of the last rendered list, `None` for a no-results or unloaded list
    pub items: Option<Vec<String>>,
    pub no_results: bool,
    pub counts: Vec<usize>,
    pub renders: usize,
}

pub struct RecordingList {
    log: Arc<Mutex<ListLog>>,
}

impl RecordingList {
    pub fn new() -> (Self, Arc<Mutex<ListLog>>) {
        let log = Arc::new(Mutex::new(ListLog::default()));
        (Self { log: Arc::clone(&log) }, log)
    }
}

impl ListRenderTarget for RecordingList {
    fn render_list(&mut self, list: &ResultsList) {
        let mut log = self.log.lock().unwrap();
        log.renders += 1;
        log.no_results = matches!(list, ResultsList::NoResults);
        log.items = match list {
            ResultsList::Items(items) => {
                Some(items.iter().map(|item| item.facility_id.clone()).collect())
            }
            _ => None,
        };
    }

    fn render_count(&mut self, count: usize) {
        self.log.lock().unwrap().counts.push(count);
    }
}

// ---------------------------------------------------------------------------
// Geolocation
// ---------------------------------------------------------------------------

/// A provider whose request never completes
pub struct PendingGeolocation;

#[async_trait]
impl GeolocationProvider for PendingGeolocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        std::future::pending().await
    }
}
