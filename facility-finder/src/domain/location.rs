//! Geographic coordinate types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing a location from invalid coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location: {reason}")]
pub struct InvalidLocation {
    reason: &'static str,
}

/// Returns true if `lat`/`lng` are finite and inside WGS-84 bounds.
pub fn coordinates_valid(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
}

/// A latitude/longitude pair for the user's position.
///
/// Any `UserLocation` built through [`UserLocation::new`] has finite,
/// in-range coordinates.
///
/// # Examples
///
/// ```
/// use facility_finder::domain::UserLocation;
///
/// let here = UserLocation::new(12.9716, 77.5946).unwrap();
/// assert_eq!(here.lat, 12.9716);
///
/// assert!(UserLocation::new(f64::NAN, 77.5946).is_err());
/// assert!(UserLocation::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub lat: f64,
    pub lng: f64,
}

impl UserLocation {
    /// Create a location, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidLocation> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidLocation {
                reason: "coordinates must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidLocation {
                reason: "latitude must be within -90..=90",
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidLocation {
                reason: "longitude must be within -180..=180",
            });
        }
        Ok(Self { lat, lng })
    }

    /// Whether this value still satisfies the constructor's checks.
    ///
    /// Values deserialized from storage bypass `new`, so callers re-check.
    pub fn is_valid(&self) -> bool {
        coordinates_valid(self.lat, self.lng)
    }
}

impl fmt::Display for UserLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every in-range pair constructs and reports itself valid.
        #[test]
        fn in_range_always_valid(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let loc = UserLocation::new(lat, lng).unwrap();
            prop_assert!(loc.is_valid());
        }

        /// Latitudes beyond the poles are always rejected.
        #[test]
        fn latitude_beyond_poles_rejected(lat in 90.0001f64..1000.0, lng in -180.0f64..=180.0) {
            prop_assert!(UserLocation::new(lat, lng).is_err());
            prop_assert!(UserLocation::new(-lat, lng).is_err());
        }
    }
}
