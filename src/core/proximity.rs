//! Counting facilities near a user position

use crate::core::facility::{Coordinate, Facility};
use std::sync::Arc;

/// Default radius in raw degrees (roughly 55 km at Algerian latitudes)
pub const DEFAULT_RADIUS: f64 = 0.5;

/// Reports how many facilities lie within a fixed radius of a point.
///
/// Distance is planar Euclidean over degrees, see
/// [`Coordinate::planar_distance`]. The reporter always works on the full
/// working set, independent of the active filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityReporter {
    radius: f64,
}

impl Default for ProximityReporter {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS)
    }
}

impl ProximityReporter {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Facilities strictly closer than the radius, in input order
    pub fn nearby<'a>(
        &self,
        user: Coordinate,
        facilities: &'a [Arc<Facility>],
    ) -> impl Iterator<Item = &'a Arc<Facility>> + 'a {
        let radius = self.radius;
        facilities
            .iter()
            .filter(move |facility| facility.coordinate.planar_distance(&user) < radius)
    }

    pub fn report(&self, user: Coordinate, facilities: &[Arc<Facility>]) -> usize {
        self.nearby(user, facilities).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(id: &str, lat: f64, lng: f64) -> Arc<Facility> {
        Arc::new(Facility::from_record(&json!({"id": id, "lat": lat, "lng": lng})).unwrap())
    }

    #[test]
    fn test_counts_within_radius() {
        let facilities = vec![at("near", 0.1, 0.1), at("far", 10.0, 10.0)];
        let reporter = ProximityReporter::new(0.5);

        assert_eq!(reporter.report(Coordinate::new(0.0, 0.0), &facilities), 1);
        let ids: Vec<&str> = reporter
            .nearby(Coordinate::new(0.0, 0.0), &facilities)
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["near"]);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        // distance is exactly 0.5
        let facilities = vec![at("edge", 36.5, 3.0)];
        let reporter = ProximityReporter::new(0.5);
        assert_eq!(reporter.report(Coordinate::new(36.0, 3.0), &facilities), 0);
    }

    #[test]
    fn test_planar_not_geodesic() {
        // 0.4 degrees of longitude near the pole is a few km, near the
        // equator about 44 km; the planar rule treats both the same
        let reporter = ProximityReporter::default();
        let polar = vec![at("p", 80.0, 0.4)];
        let equatorial = vec![at("e", 0.01, 0.4)];

        assert_eq!(reporter.report(Coordinate::new(80.0, 0.0), &polar), 1);
        assert_eq!(reporter.report(Coordinate::new(0.01, 0.0), &equatorial), 1);
    }

    #[test]
    fn test_empty_set() {
        assert_eq!(ProximityReporter::default().report(Coordinate::new(1.0, 1.0), &[]), 0);
    }
}
