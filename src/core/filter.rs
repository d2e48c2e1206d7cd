//! Filter state and the filtering function
//!
//! The three predicates (type, region, free text) are conjunctive. The
//! filtered set is always rebuilt from the full collection, never patched.

use crate::core::facility::Facility;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sentinel selector value that disables a dimension
pub const ALL: &str = "all";

/// Current category, region and text-query selectors
///
/// Values are accepted literally; type and region are matched by equality.
/// `"all"` or an empty string bypasses that dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub active_type: String,
    pub active_region: String,
    pub search_query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_type: ALL.to_string(),
            active_region: ALL.to_string(),
            search_query: String::new(),
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, value: impl Into<String>) -> Self {
        self.active_type = value.into();
        self
    }

    pub fn with_region(mut self, value: impl Into<String>) -> Self {
        self.active_region = value.into();
        self
    }

    pub fn with_query(mut self, value: impl Into<String>) -> Self {
        self.search_query = value.into();
        self
    }

    /// Replace the category selector. Returns whether the value changed.
    pub fn set_type(&mut self, value: impl Into<String>) -> bool {
        replace(&mut self.active_type, value.into())
    }

    /// Replace the region selector. Returns whether the value changed.
    pub fn set_region(&mut self, value: impl Into<String>) -> bool {
        replace(&mut self.active_region, value.into())
    }

    /// Replace the free-text query. Returns whether the value changed.
    pub fn set_query(&mut self, value: impl Into<String>) -> bool {
        replace(&mut self.search_query, value.into())
    }

    pub fn matches_type(&self, facility: &Facility) -> bool {
        is_bypass(&self.active_type) || facility.facility_type == self.active_type
    }

    pub fn matches_region(&self, facility: &Facility) -> bool {
        is_bypass(&self.active_region) || facility.wilaya == self.active_region
    }

    /// Case-insensitive substring match against name, type, region and
    /// address, each checked on its own. An empty query matches everything.
    pub fn matches_text(&self, facility: &Facility) -> bool {
        let needle = self.search_query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            &facility.name,
            &facility.facility_type,
            &facility.wilaya,
            &facility.address,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches(&self, facility: &Facility) -> bool {
        self.matches_type(facility) && self.matches_region(facility) && self.matches_text(facility)
    }

    /// Whether every dimension is bypassed
    pub fn is_unfiltered(&self) -> bool {
        is_bypass(&self.active_type)
            && is_bypass(&self.active_region)
            && self.search_query.trim().is_empty()
    }
}

fn is_bypass(value: &str) -> bool {
    value.is_empty() || value == ALL
}

fn replace(slot: &mut String, value: String) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// Stable filter of `all` by `state`.
///
/// Pure and deterministic: output order is input order, and the returned
/// handles point at the same facilities as the input.
pub fn compute_filtered(all: &[Arc<Facility>], state: &FilterState) -> Vec<Arc<Facility>> {
    all.iter()
        .filter(|facility| state.matches(facility))
        .cloned()
        .collect()
}

/// Values offered by the type and region selectors
///
/// Both lists start with the `"all"` sentinel. Types keep first-seen order,
/// regions are sorted. Empty values are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    pub types: Vec<String>,
    pub regions: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            types: vec![ALL.to_string()],
            regions: vec![ALL.to_string()],
        }
    }
}

impl SearchOptions {
    /// Collect the options offered by a working set
    pub fn from_facilities(facilities: &[Arc<Facility>]) -> Self {
        let types: IndexSet<&str> = facilities
            .iter()
            .map(|f| f.facility_type.as_str())
            .filter(|t| !t.is_empty())
            .collect();

        let mut regions: Vec<&str> = facilities
            .iter()
            .map(|f| f.wilaya.as_str())
            .filter(|w| !w.is_empty())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();
        regions.sort_unstable();

        Self {
            types: std::iter::once(ALL)
                .chain(types)
                .map(str::to_string)
                .collect(),
            regions: std::iter::once(ALL)
                .chain(regions)
                .map(str::to_string)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn facility(id: &str, kind: &str, wilaya: &str, name: &str, address: &str) -> Arc<Facility> {
        Arc::new(
            Facility::from_record(&json!({
                "id": id,
                "type": kind,
                "wilaya": wilaya,
                "name": name,
                "address": address,
                "lat": 36.0,
                "lng": 3.0
            }))
            .unwrap(),
        )
    }

    fn fixtures() -> Vec<Arc<Facility>> {
        vec![
            facility("1", "clinic", "X", "North Clinic", "12 Spa Street"),
            facility("2", "school", "Y", "Central School", "Main Road"),
            facility("3", "clinic", "Y", "South Clinic", "Harbour Road"),
        ]
    }

    fn ids(set: &[Arc<Facility>]) -> Vec<&str> {
        set.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_default_state_matches_everything() {
        let all = fixtures();
        let state = FilterState::default();

        assert!(state.is_unfiltered());
        assert_eq!(ids(&compute_filtered(&all, &state)), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_type_filter() {
        let all = fixtures();
        let state = FilterState::new().with_type("school");
        assert_eq!(ids(&compute_filtered(&all, &state)), vec!["2"]);
    }

    #[test]
    fn test_empty_selector_bypasses_dimension() {
        let all = fixtures();
        let state = FilterState::new().with_type("").with_region("");
        assert_eq!(compute_filtered(&all, &state).len(), 3);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let all = fixtures();
        let state = FilterState::new().with_type("clinic").with_region("Y");
        assert_eq!(ids(&compute_filtered(&all, &state)), vec!["3"]);

        let state = state.with_query("north");
        assert!(compute_filtered(&all, &state).is_empty());
    }

    #[test]
    fn test_query_is_trimmed_and_case_insensitive() {
        let all = fixtures();
        let state = FilterState::new().with_query("  SPA ");
        assert_eq!(ids(&compute_filtered(&all, &state)), vec!["1"]);
    }

    #[test]
    fn test_query_checks_each_field_independently() {
        let all = fixtures();
        // "clinic" appears in type and name; "road" only in addresses
        assert_eq!(
            ids(&compute_filtered(&all, &FilterState::new().with_query("road"))),
            vec!["2", "3"]
        );
        // a query spanning two fields does not match their concatenation
        assert!(compute_filtered(&all, &FilterState::new().with_query("clinicx")).is_empty());
    }

    #[test]
    fn test_type_match_is_exact() {
        let all = fixtures();
        let state = FilterState::new().with_type("Clinic");
        assert!(compute_filtered(&all, &state).is_empty());
    }

    #[test]
    fn test_output_shares_identity_with_input() {
        let all = fixtures();
        let filtered = compute_filtered(&all, &FilterState::new().with_region("X"));
        assert!(Arc::ptr_eq(&filtered[0], &all[0]));
    }

    #[test]
    fn test_deterministic() {
        let all = fixtures();
        let state = FilterState::new().with_query("c");
        let first = compute_filtered(&all, &state);
        let second = compute_filtered(&all, &state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_options() {
        let mut all = fixtures();
        all.push(facility("4", "", "", "Unnamed", ""));

        let options = SearchOptions::from_facilities(&all);
        assert_eq!(options.types, vec!["all", "clinic", "school"]);
        assert_eq!(options.regions, vec!["all", "X", "Y"]);

        assert_eq!(SearchOptions::from_facilities(&[]), SearchOptions::default());
    }

    #[test]
    fn test_setters_report_change() {
        let mut state = FilterState::new();
        assert!(state.set_type("clinic"));
        assert!(!state.set_type("clinic"));
        assert!(state.set_region("X"));
        assert!(state.set_query("spa"));
        assert!(!state.set_query("spa"));
        assert_eq!(state.active_type, "clinic");
        assert_eq!(state.active_region, "X");
        assert_eq!(state.search_query, "spa");
    }
}
