//! Durable key-value storage.
//!
//! Replaces ad hoc local-storage calls with an injected store. The
//! geolocator persists the last fix and the discovery service caches the
//! last live search result; both go through [`KeyValueStore`].

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key holding the last fetched live candidate list.
pub const ALL_FACILITIES_KEY: &str = "allFacilities";

/// Key holding the last known user location.
pub const USER_LOCATION_KEY: &str = "userLocation";

/// A string key-value store with JSON string values.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for `key`, if present.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Load and deserialize a JSON value.
///
/// Returns `Ok(None)` for a missing key. A value that no longer parses is
/// treated as missing and logged, since the store only holds caches.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable stored value");
            Ok(None)
        }
    }
}

/// Serialize `value` as JSON and store it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|e| StoreError::Serialize {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, &json)
}
