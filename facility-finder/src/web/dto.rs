//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::discovery::{DiscoverySnapshot, Notice};
use crate::domain::UserLocation;
use crate::geocode::GeocodeHit;
use crate::geolocation::LocationFix;

/// Request to run a live search.
///
/// Both coordinates or neither; without them the map centre is used.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNearbyRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    /// Overrides the configured radius
    pub radius_meters: Option<u32>,
}

/// Request to toggle one type label.
#[derive(Debug, Deserialize)]
pub struct ToggleTypeRequest {
    /// Normalized label, e.g. "Health Centers"
    pub label: String,
}

/// Request to toggle one facility's selection.
#[derive(Debug, Deserialize)]
pub struct ToggleFacilityRequest {
    pub id: String,
}

/// Query for the place search box.
#[derive(Debug, Deserialize)]
pub struct GeocodeRequest {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResult {
    /// Whether the item is selected after the toggle
    pub selected: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateResult {
    pub location: UserLocation,
    pub acquired_at: DateTime<Utc>,
}

impl From<LocationFix> for LocateResult {
    fn from(fix: LocationFix) -> Self {
        Self {
            location: fix.location,
            acquired_at: fix.acquired_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub location: UserLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl From<GeocodeHit> for GeocodeResult {
    fn from(hit: GeocodeHit) -> Self {
        Self {
            location: hit.location,
            display_name: hit.display_name,
        }
    }
}

/// Response to an action.
///
/// A recovered failure has no `result` and carries a `notice`; `state` is
/// always the state after the action.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,

    pub state: DiscoverySnapshot,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
