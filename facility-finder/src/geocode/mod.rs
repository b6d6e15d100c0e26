//! Free-text place search via Nominatim.
//!
//! Used by the map search box: the first hit's coordinates recenter the
//! map. Lookups are cached in memory.

mod cache;
mod client;
mod error;

pub use cache::{CachedGeocoder, GeocodeCacheConfig};
pub use client::{GeocodeHit, NominatimClient, NominatimConfig};
pub use error::GeocodeError;
