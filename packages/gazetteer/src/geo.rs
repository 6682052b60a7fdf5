//! Geometry helpers: bounding-box containment and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::types::record::Coordinates;

/// Mean Earth radius in kilometers, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Rectangular latitude/longitude range approximating a municipal boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl BoundingBox {
    pub const fn new(lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        }
    }

    /// True iff the point lies inside the box, edges included.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        self.lat_min <= lat && lat <= self.lat_max && self.lng_min <= lng && lng <= self.lng_max
    }
}

/// Great-circle distance between two points in meters.
pub fn haversine_m(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * h.sqrt().asin() * EARTH_RADIUS_KM * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_edges_are_inside() {
        let bbox = BoundingBox::new(11.2, 11.6, 124.9, 125.4);
        assert!(bbox.contains(11.2, 125.0));
        assert!(bbox.contains(11.6, 125.4));
        assert!(bbox.contains(11.3, 125.0));
        assert!(!bbox.contains(11.9, 125.0));
        assert!(!bbox.contains(11.3, 124.8));
    }

    #[test]
    fn test_haversine_zero_for_identical_points() {
        let p = Coordinates::new(11.2792, 125.0650);
        assert_eq!(haversine_m(p, p), 0.0);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let a = Coordinates::new(11.2792, 125.0650);
        let b = Coordinates::new(11.4167, 125.1167);
        let ab = haversine_m(a, b);
        let ba = haversine_m(b, a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_one_ten_thousandth_degree_of_latitude() {
        let a = Coordinates::new(11.2792, 125.0650);
        let b = Coordinates::new(11.2793, 125.0650);
        let d = haversine_m(a, b);
        assert!((d - 11.1).abs() < 0.2, "expected ~11.1 m, got {d}");
    }
}
