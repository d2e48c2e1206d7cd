//! View synchronization controller
//!
//! Owns the working set, the filter state and the latest projections, and
//! keeps the map and the results list consistent with each other.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──reload()──▶ Loading ──▶ Ready ──set_* / reload()──▶ Ready
//! ```
//!
//! Every transition into `Ready` runs one recomputation: the filtered set
//! is computed once and both projections, plus the result count, are
//! derived from that single value before the render targets are invoked.
//! Filter setters and `focus` are synchronous; only loading and locating
//! wait on collaborators.
//!
//! # Usage
//!
//! ```rust,ignore
//! let store = FacilityStore::new(Arc::new(source.clone()), "ordo_facilities");
//! let mut controller = ViewSyncController::new(store, MapConfig::default_config());
//!
//! controller.subscribe_map(Box::new(my_map));
//! controller.subscribe_list(Box::new(my_list));
//! controller.reload().await;
//!
//! controller.set_type("مستشفى");
//! controller.focus(0);
//! ```

use crate::config::MapConfig;
use crate::core::category::CategoryStyles;
use crate::core::events::{ChangeListener, EventBus, StoreEvent};
use crate::core::facility::{Coordinate, Facility};
use crate::core::filter::{FilterState, SearchOptions, compute_filtered};
use crate::core::geolocation::{GeolocationProvider, LocationStatus};
use crate::core::projection::{MarkerDescriptor, ResultsList, project_markers};
use crate::core::proximity::ProximityReporter;
use crate::core::render::{ListRenderTarget, MapRenderTarget, SubscriptionId, Subscriptions};
use crate::core::store::FacilityStore;
use serde::Serialize;
use std::sync::Arc;

/// Controller lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// Nothing loaded yet
    Idle,
    /// Waiting on the record source
    Loading,
    /// Projections reflect the current data and filter
    Ready,
}

/// Result of one recomputation
///
/// `markers` and `list` are both derived from `filtered`, so they always
/// describe the same set of facilities.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewSnapshot {
    #[serde(skip)]
    pub filtered: Arc<[Arc<Facility>]>,
    pub markers: Vec<MarkerDescriptor>,
    pub list: ResultsList,
    pub result_count: usize,
    /// Incremented on every recomputation
    pub generation: u64,
}

impl ViewSnapshot {
    /// The marker produced from the same facility as list item `index`
    pub fn marker_for_item(&self, index: usize) -> Option<&MarkerDescriptor> {
        let item = self.list.get(index)?;
        self.markers.iter().find(|marker| marker.is_for(&item.facility))
    }
}

pub struct ViewSyncController {
    store: FacilityStore,
    config: MapConfig,
    styles: CategoryStyles,
    proximity: ProximityReporter,
    state: ViewState,
    filter: FilterState,
    facilities: Arc<[Arc<Facility>]>,
    options: SearchOptions,
    snapshot: ViewSnapshot,
    user_position: Option<Coordinate>,
    maps: Subscriptions<dyn MapRenderTarget>,
    lists: Subscriptions<dyn ListRenderTarget>,
}

impl ViewSyncController {
    pub fn new(store: FacilityStore, config: MapConfig) -> Self {
        Self {
            store,
            styles: config.category_styles(),
            proximity: ProximityReporter::new(config.proximity_radius),
            config,
            state: ViewState::Idle,
            filter: FilterState::default(),
            facilities: Arc::from(Vec::new()),
            options: SearchOptions::default(),
            snapshot: ViewSnapshot::default(),
            user_position: None,
            maps: Subscriptions::new(),
            lists: Subscriptions::new(),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The full working set, independent of the filter
    pub fn facilities(&self) -> &[Arc<Facility>] {
        &self.facilities
    }

    pub fn snapshot(&self) -> &ViewSnapshot {
        &self.snapshot
    }

    pub fn result_count(&self) -> usize {
        self.snapshot.result_count
    }

    pub fn search_options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn user_position(&self) -> Option<Coordinate> {
        self.user_position
    }

    // === Loading ===

    /// Re-read the record source and recompute everything
    ///
    /// Used both for the initial load and whenever the source reports a
    /// change. An empty or unreadable source still ends in `Ready`.
    pub async fn reload(&mut self) -> &ViewSnapshot {
        self.state = ViewState::Loading;

        let facilities = self.store.load().await;
        self.facilities = Arc::from(facilities);
        self.options = SearchOptions::from_facilities(&self.facilities);

        tracing::info!(
            collection = %self.store.collection(),
            facilities = self.facilities.len(),
            "Facilities loaded"
        );

        self.state = ViewState::Ready;
        self.recompute();
        &self.snapshot
    }

    /// Listener for changes to the rendered collection on `bus`
    pub fn change_listener(&self, bus: &EventBus) -> ChangeListener {
        ChangeListener::new(bus, self.store.collection())
    }

    /// Handle one change notification
    ///
    /// Reloads when the event concerns the rendered collection and returns
    /// whether it did. Meant to run as one branch of the caller's event
    /// loop next to user commands:
    ///
    /// ```rust,ignore
    /// loop {
    ///     tokio::select! {
    ///         Some(event) = listener.next_change() => {
    ///             controller.on_store_change(&event).await;
    ///         }
    ///         Some(query) = queries.recv() => {
    ///             controller.set_query(query);
    ///         }
    ///         else => break,
    ///     }
    /// }
    /// ```
    pub async fn on_store_change(&mut self, event: &StoreEvent) -> bool {
        if event.collection() != self.store.collection() {
            return false;
        }

        tracing::debug!(
            collection = %event.collection(),
            action = %event.action(),
            "Record collection changed"
        );
        self.reload().await;
        true
    }

    // === Filter mutations ===

    /// Set the category selector (`"all"` to disable)
    pub fn set_type(&mut self, value: impl Into<String>) -> &ViewSnapshot {
        self.filter.set_type(value);
        self.refresh()
    }

    /// Set the region selector (`"all"` to disable)
    pub fn set_region(&mut self, value: impl Into<String>) -> &ViewSnapshot {
        self.filter.set_region(value);
        self.refresh()
    }

    /// Set the free-text query
    pub fn set_query(&mut self, value: impl Into<String>) -> &ViewSnapshot {
        self.filter.set_query(value);
        self.refresh()
    }

    /// Reset the free-text query
    pub fn clear_search(&mut self) -> &ViewSnapshot {
        self.set_query(String::new())
    }

    /// Recompute if data is present; before the first load the new filter
    /// is simply kept for it.
    fn refresh(&mut self) -> &ViewSnapshot {
        if self.state == ViewState::Ready {
            self.recompute();
        }
        &self.snapshot
    }

    fn recompute(&mut self) {
        let filtered: Arc<[Arc<Facility>]> =
            Arc::from(compute_filtered(&self.facilities, &self.filter));

        let markers = project_markers(&filtered, &self.styles);
        let list = ResultsList::project(&filtered, &self.styles);

        self.snapshot = ViewSnapshot {
            result_count: filtered.len(),
            filtered,
            markers,
            list,
            generation: self.snapshot.generation + 1,
        };

        tracing::debug!(
            generation = self.snapshot.generation,
            total = self.facilities.len(),
            filtered = self.snapshot.result_count,
            "View recomputed"
        );

        let snapshot = &self.snapshot;
        for map in self.maps.iter_mut() {
            draw_markers(map, snapshot);
        }
        for list in self.lists.iter_mut() {
            draw_list(list, snapshot);
        }
    }

    // === Navigation ===

    /// Center the map on list item `index` and open its info panel
    ///
    /// Returns the focused facility, or `None` (and does nothing) when the
    /// index is out of range for the current list.
    pub fn focus(&mut self, index: usize) -> Option<Arc<Facility>> {
        let marker = self.snapshot.marker_for_item(index)?;
        let zoom = self.config.focus_zoom;

        for map in self.maps.iter_mut() {
            map.set_view(marker.coordinate, zoom);
            map.open_info_panel(marker);
        }

        Some(Arc::clone(&marker.facility))
    }

    /// Acquire the user's position and count nearby facilities
    ///
    /// Proximity covers the full working set, not only the filtered one.
    /// Failures are returned as a status; nothing is retried.
    pub async fn locate(&mut self, provider: &dyn GeolocationProvider) -> LocationStatus {
        tracing::debug!("Requesting user location");

        let position = match provider.current_position().await {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!(error = %e, code = e.error_code(), "Location request failed");
                return LocationStatus::failed(e);
            }
        };

        self.user_position = Some(position);
        let zoom = self.config.locate_zoom;
        for map in self.maps.iter_mut() {
            map.show_user_location(position);
            map.set_view(position, zoom);
        }

        let nearby = self.proximity.report(position, &self.facilities);
        tracing::info!(
            lat = position.lat,
            lng = position.lng,
            nearby,
            radius = self.proximity.radius(),
            "User located"
        );

        LocationStatus::Located { position, nearby }
    }

    // === Subscriptions ===

    /// Register a map target
    ///
    /// The target is moved to the initial view and, when data is present,
    /// receives the current markers right away.
    pub fn subscribe_map(&mut self, mut target: Box<dyn MapRenderTarget>) -> SubscriptionId {
        let view = &self.config.initial_view;
        target.set_view(view.center, view.zoom);

        if self.state == ViewState::Ready {
            draw_markers(target.as_mut(), &self.snapshot);
        }
        if let Some(position) = self.user_position {
            target.show_user_location(position);
        }

        self.maps.add(target)
    }

    /// Register a list target; it receives the current list right away
    pub fn subscribe_list(&mut self, mut target: Box<dyn ListRenderTarget>) -> SubscriptionId {
        draw_list(target.as_mut(), &self.snapshot);
        self.lists.add(target)
    }

    /// Revoke a map or list subscription
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.maps.remove(id) || self.lists.remove(id)
    }
}

fn draw_markers(map: &mut dyn MapRenderTarget, snapshot: &ViewSnapshot) {
    map.clear_markers();
    for marker in &snapshot.markers {
        map.add_marker(marker);
    }
}

fn draw_list(list: &mut dyn ListRenderTarget, snapshot: &ViewSnapshot) {
    list.render_list(&snapshot.list);
    list.render_count(snapshot.result_count);
}
