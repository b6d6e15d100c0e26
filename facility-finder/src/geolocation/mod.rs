//! Geolocation provider.
//!
//! Obtains a single fresh position fix from a [`PositionSource`] (the
//! device capability), enforces the request timeout, maps platform errors
//! into [`GeolocationError`] and persists successful fixes.

mod error;
mod locator;
mod source;

pub use error::{GeolocationError, PositionError};
pub use locator::{Geolocator, LocationFix};
pub use source::{DevicePosition, PositionOptions, PositionSource};
