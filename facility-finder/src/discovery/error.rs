//! Engine error taxonomy and user-facing notices.

use serde::Serialize;

use crate::domain::FacilityId;
use crate::geocode::GeocodeError;
use crate::geolocation::GeolocationError;

/// Errors surfaced by the discovery service.
///
/// None of these is fatal. Each maps to a [`Notice`] for the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    #[error("location services are not available on this device")]
    GeolocationUnavailable,

    #[error("location permission was denied")]
    GeolocationDenied,

    #[error("timed out waiting for your location")]
    GeolocationTimeout,

    /// The directory could not be loaded; seed data is shown instead
    #[error("facility directory unavailable: {0}")]
    DirectoryFetchFailed(String),

    /// The live search failed; the candidate list and cache were emptied
    #[error("live search failed: {0}")]
    LiveSearchFailed(String),

    #[error("no place found for \"{query}\"")]
    GeocodeNotFound { query: String },

    #[error("place search failed: {0}")]
    GeocodeFailed(String),

    #[error("a search is already in progress")]
    SearchInProgress,

    #[error("facility {0} is not in the visible list")]
    UnknownFacility(FacilityId),

    #[error("{0}")]
    InvalidRequest(String),
}

impl From<GeolocationError> for DiscoveryError {
    fn from(err: GeolocationError) -> Self {
        match err {
            GeolocationError::Unavailable => DiscoveryError::GeolocationUnavailable,
            GeolocationError::Denied => DiscoveryError::GeolocationDenied,
            GeolocationError::Timeout => DiscoveryError::GeolocationTimeout,
        }
    }
}

impl From<GeocodeError> for DiscoveryError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NotFound { query } => DiscoveryError::GeocodeNotFound { query },
            GeocodeError::EmptyQuery => {
                DiscoveryError::InvalidRequest("search text is empty".to_string())
            }
            other => DiscoveryError::GeocodeFailed(other.to_string()),
        }
    }
}

impl DiscoveryError {
    pub fn notice(&self) -> Notice {
        let level = match self {
            DiscoveryError::DirectoryFetchFailed(_) | DiscoveryError::GeocodeNotFound { .. } => {
                NoticeLevel::Warning
            }
            DiscoveryError::SearchInProgress => NoticeLevel::Info,
            _ => NoticeLevel::Error,
        };

        Notice {
            level,
            message: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}
