//! Geolocation error types.

/// Errors reported by a platform position source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The user or platform refused access to location
    #[error("permission denied")]
    PermissionDenied,

    /// The platform could not determine a position
    #[error("position unavailable")]
    PositionUnavailable,

    /// The platform gave up waiting for a fix
    #[error("timed out")]
    Timeout,
}

/// Errors from acquiring the user's location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    /// No geolocation capability, or no position could be determined
    #[error("geolocation is not available")]
    Unavailable,

    /// Location permission was denied
    #[error("location permission denied")]
    Denied,

    /// No fix arrived within the timeout
    #[error("timed out waiting for location")]
    Timeout,
}

impl From<PositionError> for GeolocationError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::PermissionDenied => GeolocationError::Denied,
            PositionError::PositionUnavailable => GeolocationError::Unavailable,
            PositionError::Timeout => GeolocationError::Timeout,
        }
    }
}
