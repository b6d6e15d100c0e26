//! Position sources.

use std::future::Future;
use std::time::Duration;

use crate::domain::UserLocation;

use super::error::PositionError;

/// Request options handed to the position source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask for the most accurate fix available.
    pub enable_high_accuracy: bool,

    /// How long to wait for a fix.
    pub timeout: Duration,

    /// Maximum age of a cached fix. Zero forces a fresh reading.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

/// A device capability that can report the current position.
pub trait PositionSource: Send + Sync {
    /// Whether the capability exists at all in this runtime.
    fn is_supported(&self) -> bool {
        true
    }

    /// Request a single position fix.
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<UserLocation, PositionError>> + Send;
}

/// Position source configured at startup.
///
/// A server has no GPS; the "device" position is either a configured fix
/// or absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DevicePosition {
    /// Always reports this location.
    Fixed(UserLocation),

    /// No geolocation capability.
    Unsupported,
}

impl PositionSource for DevicePosition {
    fn is_supported(&self) -> bool {
        matches!(self, DevicePosition::Fixed(_))
    }

    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<UserLocation, PositionError> {
        match self {
            DevicePosition::Fixed(location) => Ok(*location),
            DevicePosition::Unsupported => Err(PositionError::PositionUnavailable),
        }
    }
}
