//! Great-circle distance.

use crate::domain::UserLocation;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometres.
///
/// The result is not rounded.
pub fn haversine_km(from: &UserLocation, to: &UserLocation) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1] for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(lat: f64, lng: f64) -> UserLocation {
        UserLocation::new(lat, lng).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        let bangalore = loc(12.9716, 77.5946);
        assert_eq!(haversine_km(&bangalore, &bangalore), 0.0);
    }

    #[test]
    fn tenth_of_a_degree_north() {
        let origin = loc(12.9716, 77.5946);
        let north = loc(13.0716, 77.5946);
        let d = haversine_km(&origin, &north);
        assert!((d - 11.1).abs() <= 0.2, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = loc(51.5074, -0.1278);
        let b = loc(48.8566, 2.3522);
        assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn london_to_paris() {
        let london = loc(51.5074, -0.1278);
        let paris = loc(48.8566, 2.3522);
        let d = haversine_km(&london, &paris);
        assert!((d - 343.5).abs() < 2.0, "got {d}");
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = haversine_km(&loc(0.0, 0.0), &loc(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half).abs() < 1e-6);
    }
}
