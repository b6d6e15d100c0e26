//! Nearest-first ranking of facilities.

use std::cmp::Ordering;

use crate::domain::{Facility, UserLocation};

use super::distance::haversine_km;

/// Rank facilities by distance from `origin`.
///
/// Every displayable facility gets its `distance` (km) set and the list is
/// sorted ascending. The sort is stable, so equidistant facilities keep
/// their input order. Facilities without valid coordinates keep
/// `distance = None` and sort after all annotated ones.
///
/// With no origin the list is returned unchanged: nothing is annotated,
/// sorted or dropped.
pub fn rank(facilities: Vec<Facility>, origin: Option<&UserLocation>) -> Vec<Facility> {
    let Some(origin) = origin else {
        return facilities;
    };

    let mut ranked: Vec<Facility> = facilities
        .into_iter()
        .map(|mut facility| {
            facility.distance = facility
                .location()
                .map(|position| haversine_km(origin, &position));
            facility
        })
        .collect();

    ranked.sort_by(|a, b| compare_distance(a.distance, b.distance));
    ranked
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Keep only facilities within `radius_km` of `origin`.
///
/// Used to re-check live search results against the radius that was sent
/// to the provider. Facilities without valid coordinates are dropped.
pub fn within_radius(
    facilities: Vec<Facility>,
    origin: &UserLocation,
    radius_km: f64,
) -> Vec<Facility> {
    facilities
        .into_iter()
        .filter(|facility| {
            facility
                .location()
                .is_some_and(|position| haversine_km(origin, &position) <= radius_km)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> UserLocation {
        UserLocation::new(12.9716, 77.5946).unwrap()
    }

    fn facility(id: &str, lat: f64, lng: f64) -> Facility {
        Facility::new(id, format!("Facility {id}"), "Clinic", lat, lng).unwrap()
    }

    fn ids(list: &[Facility]) -> Vec<&str> {
        list.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn coincident_facility_has_zero_distance() {
        let ranked = rank(vec![facility("A", 12.9716, 77.5946)], Some(&origin()));
        assert_eq!(ranked[0].distance, Some(0.0));
    }

    #[test]
    fn tenth_degree_north_is_about_eleven_km() {
        let ranked = rank(vec![facility("B", 13.0716, 77.5946)], Some(&origin()));
        let d = ranked[0].distance.unwrap();
        assert!((d - 11.1).abs() <= 0.2, "got {d}");
    }

    #[test]
    fn sorts_nearest_first() {
        let list = vec![
            facility("far", 13.2, 77.5946),
            facility("near", 12.98, 77.5946),
            facility("mid", 13.05, 77.5946),
        ];
        let ranked = rank(list, Some(&origin()));
        assert_eq!(ids(&ranked), ["near", "mid", "far"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let equal = vec![
            facility("x", 13.0, 77.5946),
            facility("y", 13.0, 77.5946),
            facility("z", 13.0, 77.5946),
        ];
        let ranked = rank(equal, Some(&origin()));
        assert_eq!(ids(&ranked), ["x", "y", "z"]);
    }

    #[test]
    fn no_origin_passes_through() {
        let list = vec![facility("far", 13.2, 77.59), facility("near", 12.98, 77.59)];
        let out = rank(list.clone(), None);
        assert_eq!(out, list);
        assert!(out.iter().all(|f| f.distance.is_none()));
    }

    #[test]
    fn invalid_coordinates_sort_last_without_distance() {
        let mut broken = facility("broken", 12.0, 77.0);
        broken.lng = f64::NAN;
        let list = vec![broken, facility("ok", 13.0, 77.5946)];
        let ranked = rank(list, Some(&origin()));
        assert_eq!(ids(&ranked), ["ok", "broken"]);
        assert!(ranked[1].distance.is_none());
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn within_radius_drops_far_facilities() {
        let list = vec![
            facility("near", 12.98, 77.5946),
            facility("far", 13.2, 77.5946),
        ];
        let kept = within_radius(list, &origin(), 11.0);
        assert_eq!(ids(&kept), ["near"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn facilities() -> impl Strategy<Value = Vec<Facility>> {
        prop::collection::vec((-60.0f64..60.0, -170.0f64..170.0), 0..30).prop_map(|coords| {
            coords
                .into_iter()
                .enumerate()
                .map(|(i, (lat, lng))| {
                    Facility::new(i.to_string(), "F", "Clinic", lat, lng).unwrap()
                })
                .collect()
        })
    }

    fn origin() -> impl Strategy<Value = UserLocation> {
        (-60.0f64..60.0, -170.0f64..170.0)
            .prop_map(|(lat, lng)| UserLocation::new(lat, lng).unwrap())
    }

    proptest! {
        /// Ranking twice with the same origin changes nothing.
        #[test]
        fn idempotent(list in facilities(), o in origin()) {
            let once = rank(list, Some(&o));
            let twice = rank(once.clone(), Some(&o));
            prop_assert_eq!(once, twice);
        }

        /// Distances are present, non-negative and non-decreasing.
        #[test]
        fn sorted_non_negative(list in facilities(), o in origin()) {
            let ranked = rank(list, Some(&o));
            let distances: Vec<f64> = ranked.iter().map(|f| f.distance.unwrap()).collect();
            prop_assert!(distances.iter().all(|d| *d >= 0.0));
            prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        }

        /// Ranking is a permutation: nothing dropped, nothing invented.
        #[test]
        fn permutation(list in facilities(), o in origin()) {
            let mut before: Vec<String> = list.iter().map(|f| f.id.to_string()).collect();
            let mut after: Vec<String> = rank(list, Some(&o)).iter().map(|f| f.id.to_string()).collect();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }
    }
}
