//! Marker and results-list projections of a filtered set
//!
//! Both projections are plain view-models. They hold the source facility by
//! `Arc` so a list entry can be matched back to its marker by identity.

use crate::core::category::{CategoryStyle, CategoryStyles};
use crate::core::facility::{Coordinate, Facility};
use serde::Serialize;
use std::sync::Arc;

/// Content of the info panel opened on a marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanel {
    pub title: String,
    pub type_label: String,
    pub region: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub opening_hours: Option<String>,
}

impl InfoPanel {
    pub fn for_facility(facility: &Facility) -> Self {
        Self {
            title: facility.name.clone(),
            type_label: facility.facility_type.clone(),
            region: non_empty(&facility.wilaya),
            address: non_empty(&facility.address),
            phone: facility.phone.clone(),
            email: facility.email.clone(),
            opening_hours: facility.opening_hours(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// A render-ready map marker, valid for one recomputation
#[derive(Debug, Clone, Serialize)]
pub struct MarkerDescriptor {
    #[serde(skip)]
    pub facility: Arc<Facility>,
    pub facility_id: String,
    pub coordinate: Coordinate,
    pub style: CategoryStyle,
    /// Highlight for the most recently created facility in the set
    pub is_newest: bool,
    pub info: InfoPanel,
}

impl MarkerDescriptor {
    /// Whether this marker was produced from exactly `facility`
    pub fn is_for(&self, facility: &Arc<Facility>) -> bool {
        Arc::ptr_eq(&self.facility, facility)
    }
}

/// Project a filtered set to map markers.
///
/// Markers are ordered by creation time ascending so the newest is drawn
/// last; the last one carries the newest flag. A missing `created` sorts
/// first. Equal keys keep their filtered order.
pub fn project_markers(filtered: &[Arc<Facility>], styles: &CategoryStyles) -> Vec<MarkerDescriptor> {
    let mut by_age: Vec<&Arc<Facility>> = filtered.iter().collect();
    by_age.sort_by(|a, b| a.creation_key().cmp(&b.creation_key()));

    let newest = by_age.len().checked_sub(1);

    by_age
        .into_iter()
        .enumerate()
        .map(|(position, facility)| MarkerDescriptor {
            facility: Arc::clone(facility),
            facility_id: facility.id.clone(),
            coordinate: facility.coordinate,
            style: styles.resolve(&facility.facility_type),
            is_newest: Some(position) == newest,
            info: InfoPanel::for_facility(facility),
        })
        .collect()
}

/// One summary card in the results list
#[derive(Debug, Clone, Serialize)]
pub struct ListItem {
    /// Position in the list, routed back through `focus`
    pub index: usize,
    #[serde(skip)]
    pub facility: Arc<Facility>,
    pub facility_id: String,
    pub title: String,
    /// `"type — region"`
    pub subtitle: String,
    pub style: CategoryStyle,
}

/// The results list, with its empty and not-yet-loaded states kept apart
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "snake_case")]
pub enum ResultsList {
    /// No data has been loaded yet
    #[default]
    NotLoaded,
    /// Data is loaded but nothing matches the filter
    NoResults,
    /// Items in filtered order
    Items(Vec<ListItem>),
}

impl ResultsList {
    /// Project a filtered set to list items in filtered order
    pub fn project(filtered: &[Arc<Facility>], styles: &CategoryStyles) -> Self {
        if filtered.is_empty() {
            return ResultsList::NoResults;
        }

        let items = filtered
            .iter()
            .enumerate()
            .map(|(index, facility)| ListItem {
                index,
                facility: Arc::clone(facility),
                facility_id: facility.id.clone(),
                title: facility.name.clone(),
                subtitle: format!("{} — {}", facility.facility_type, facility.wilaya),
                style: styles.resolve(&facility.facility_type),
            })
            .collect();

        ResultsList::Items(items)
    }

    pub fn items(&self) -> &[ListItem] {
        match self {
            ResultsList::Items(items) => items,
            _ => &[],
        }
    }

    pub fn get(&self, index: usize) -> Option<&ListItem> {
        self.items().get(index)
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(self, ResultsList::NotLoaded)
    }
}
