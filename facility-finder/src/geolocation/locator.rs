//! Single-shot location acquisition.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::UserLocation;
use crate::store::{KeyValueStore, USER_LOCATION_KEY, load_json, save_json};

use super::error::GeolocationError;
use super::source::{PositionOptions, PositionSource};

/// A successful position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub location: UserLocation,
    pub acquired_at: DateTime<Utc>,
}

/// Acquires the user's location and remembers the last fix.
pub struct Geolocator<P> {
    source: P,
    options: PositionOptions,
    store: Arc<dyn KeyValueStore>,
}

impl<P: PositionSource> Geolocator<P> {
    /// Create a geolocator with default options (high accuracy, 10 s, no cache).
    pub fn new(source: P, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            source,
            options: PositionOptions::default(),
            store,
        }
    }

    /// Override the request options.
    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// Request one fresh position fix.
    ///
    /// On success the fix is persisted under `userLocation`, replacing any
    /// previous value. On failure nothing is written.
    pub async fn acquire_location(&self) -> Result<LocationFix, GeolocationError> {
        if !self.source.is_supported() {
            debug!("geolocation capability absent");
            return Err(GeolocationError::Unavailable);
        }

        let location = tokio::time::timeout(
            self.options.timeout,
            self.source.current_position(&self.options),
        )
        .await
        .map_err(|_| GeolocationError::Timeout)??;

        if !location.is_valid() {
            warn!(%location, "position source returned invalid coordinates");
            return Err(GeolocationError::Unavailable);
        }

        if let Err(e) = save_json(self.store.as_ref(), USER_LOCATION_KEY, &location) {
            warn!(error = %e, "failed to persist user location");
        }

        info!(%location, "acquired user location");
        Ok(LocationFix {
            location,
            acquired_at: Utc::now(),
        })
    }

    /// The last persisted fix, if any.
    pub fn last_known(&self) -> Option<UserLocation> {
        match load_json::<UserLocation>(self.store.as_ref(), USER_LOCATION_KEY) {
            Ok(location) => location.filter(UserLocation::is_valid),
            Err(e) => {
                warn!(error = %e, "failed to read stored user location");
                None
            }
        }
    }
}
