//! The discovery service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::{Facility, FacilityId, UserLocation};
use crate::filter::FilterState;
use crate::geocode::{CachedGeocoder, GeocodeHit};
use crate::geolocation::{Geolocator, LocationFix, PositionSource};
use crate::markers::MarkerPlan;
use crate::overpass::{DEFAULT_CATEGORIES, DEFAULT_RADIUS_METERS};
use crate::ranking::within_radius;
use crate::source::{FacilitySource, SeedSource, SourceQuery, merge_candidates, seed_facilities};
use crate::store::{ALL_FACILITIES_KEY, KeyValueStore, USER_LOCATION_KEY, load_json, save_json};

use super::error::{DiscoveryError, Notice};
use super::state::{CandidateOrigin, DiscoveryState, SearchTicket};

/// Live search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverySettings {
    pub radius_meters: u32,
    pub categories: Vec<String>,
    /// Keep seed facilities after a live search, behind the live results
    pub merge_seed: bool,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_RADIUS_METERS,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            merge_seed: false,
        }
    }
}

/// Result of loading a candidate set that may have fallen back to seed data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadOutcome {
    pub origin: CandidateOrigin,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Result of a live search that did not fail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Results replaced the candidate set
    Completed {
        count: usize,
        /// Results the provider returned outside the radius
        dropped: usize,
    },
    /// A newer action superseded this search; nothing was applied
    Superseded,
}

/// A consistent read of the state for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverySnapshot {
    pub origin: Option<UserLocation>,
    pub located_at: Option<DateTime<Utc>>,
    pub map_center: Option<UserLocation>,
    pub candidate_origin: CandidateOrigin,
    pub searching: bool,
    pub types: Vec<String>,
    pub filter: FilterState,
    pub facilities: Vec<Facility>,
}

/// Orchestrates location, sources, ranking and filtering.
///
/// `P` supplies positions, `D` is the directory source and `L` the live
/// source.
pub struct Discovery<P, D, L> {
    geolocator: Geolocator<P>,
    directory: D,
    live: L,
    seed: SeedSource,
    geocoder: Option<CachedGeocoder>,
    store: Arc<dyn KeyValueStore>,
    settings: DiscoverySettings,
    state: Arc<RwLock<DiscoveryState>>,
}

impl<P, D, L> Discovery<P, D, L>
where
    P: PositionSource,
    D: FacilitySource,
    L: FacilitySource,
{
    /// Create a service showing seed data.
    pub fn new(
        geolocator: Geolocator<P>,
        directory: D,
        live: L,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            geolocator,
            directory,
            live,
            seed: SeedSource,
            geocoder: None,
            store,
            settings: DiscoverySettings::default(),
            state: Arc::new(RwLock::new(DiscoveryState::new(
                seed_facilities(),
                CandidateOrigin::Seed,
            ))),
        }
    }

    pub fn with_geocoder(mut self, geocoder: CachedGeocoder) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn with_settings(mut self, settings: DiscoverySettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    /// Load the persisted candidate cache and last fix.
    ///
    /// Without a usable cache the seed list is shown.
    pub async fn restore(&self) -> LoadOutcome {
        let cached = match load_json::<Vec<Facility>>(self.store.as_ref(), ALL_FACILITIES_KEY) {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "failed to read cached facilities");
                None
            }
        };

        let (candidates, origin) = match cached {
            Some(list) => (
                list.into_iter().filter(Facility::is_displayable).collect(),
                CandidateOrigin::Cache,
            ),
            None => (self.seed_candidates().await, CandidateOrigin::Seed),
        };
        let last_known = self.geolocator.last_known();

        let count = candidates.len();
        let mut state = self.state.write().await;
        state.supersede_searches();
        state.replace_candidates(candidates, origin);
        state.restore_origin(last_known);

        info!(count, ?origin, has_location = last_known.is_some(), "restored state");
        LoadOutcome {
            origin,
            count,
            notice: None,
        }
    }

    /// Acquire a fresh fix and rank from it.
    ///
    /// On failure the previous origin and ranking are left untouched.
    pub async fn locate(&self) -> Result<LocationFix, DiscoveryError> {
        let fix = self.geolocator.acquire_location().await.map_err(|e| {
            warn!(error = %e, "geolocation failed");
            DiscoveryError::from(e)
        })?;

        self.state
            .write()
            .await
            .set_origin(fix.location, fix.acquired_at);
        Ok(fix)
    }

    /// Replace candidates with the directory listing.
    ///
    /// A failed fetch falls back to the seed list and reports a warning
    /// notice instead of an error.
    pub async fn load_directory(&self) -> LoadOutcome {
        let query = SourceQuery::new(None);
        let (candidates, origin, notice) = match self.directory.fetch(&query).await {
            Ok(list) => (list, CandidateOrigin::Directory, None),
            Err(e) => {
                warn!(error = %e, "directory fetch failed, using seed data");
                let notice = DiscoveryError::DirectoryFetchFailed(e.to_string()).notice();
                (self.seed_candidates().await, CandidateOrigin::Seed, Some(notice))
            }
        };

        let count = candidates.len();
        let mut state = self.state.write().await;
        state.supersede_searches();
        state.replace_candidates(candidates, origin);

        LoadOutcome {
            origin,
            count,
            notice,
        }
    }

    /// Run a live search around `center`, or around the map centre.
    ///
    /// Results outside the radius are dropped. On success the results
    /// replace the candidates and the cache, followed by the seed list when
    /// `merge_seed` is set. On failure both are emptied.
    pub async fn search_nearby(
        &self,
        center: Option<UserLocation>,
        radius_meters: Option<u32>,
    ) -> Result<SearchOutcome, DiscoveryError> {
        let radius_meters = radius_meters.unwrap_or(self.settings.radius_meters);
        if radius_meters == 0 {
            return Err(DiscoveryError::InvalidRequest(
                "radius must be positive".to_string(),
            ));
        }

        let (center, ticket) = {
            let mut state = self.state.write().await;
            let center = center.or_else(|| state.search_center()).ok_or_else(|| {
                DiscoveryError::InvalidRequest(
                    "no search centre: locate first or pass a centre".to_string(),
                )
            })?;
            (center, state.begin_search()?)
        };

        let query = SourceQuery::new(Some(center))
            .with_radius(radius_meters)
            .with_categories(self.settings.categories.clone());

        let mut guard = SearchGuard::new(self.state.clone(), ticket);
        let result = self.live.fetch(&query).await;
        let seed = if self.settings.merge_seed && result.is_ok() {
            Some(self.seed_candidates().await)
        } else {
            None
        };

        let mut state = self.state.write().await;
        guard.disarm();
        if !state.finish_search(ticket) {
            return Ok(SearchOutcome::Superseded);
        }

        match result {
            Ok(list) => {
                let total = list.len();
                let kept = within_radius(list, &center, f64::from(radius_meters) / 1000.0);
                let dropped = total - kept.len();
                if dropped > 0 {
                    warn!(dropped, radius_meters, "live results outside the search radius");
                }
                let kept = match seed {
                    Some(seed) => merge_candidates(seed, kept),
                    None => kept,
                };

                if let Err(e) = save_json(self.store.as_ref(), ALL_FACILITIES_KEY, &kept) {
                    warn!(error = %e, "failed to cache live results");
                }

                let count = kept.len();
                state.replace_candidates(kept, CandidateOrigin::Live);
                info!(%center, radius_meters, count, "live search completed");
                Ok(SearchOutcome::Completed { count, dropped })
            }
            Err(e) => {
                warn!(error = %e, %center, "live search failed, clearing results");
                let mut message = e.to_string();
                if let Err(e) = self.store.remove(ALL_FACILITIES_KEY) {
                    warn!(error = %e, "failed to clear cached facilities");
                    message = format!("{message}; stale cached results could not be cleared: {e}");
                }
                state.replace_candidates(Vec::new(), CandidateOrigin::Live);
                Err(DiscoveryError::LiveSearchFailed(message))
            }
        }
    }

    async fn seed_candidates(&self) -> Vec<Facility> {
        match self.seed.fetch(&SourceQuery::new(None)).await {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "seed source failed");
                Vec::new()
            }
        }
    }

    /// Move the map centre to a geocoded place.
    pub async fn recenter(&self, query: &str) -> Result<GeocodeHit, DiscoveryError> {
        let geocoder = self.geocoder.as_ref().ok_or_else(|| {
            DiscoveryError::GeocodeFailed("place search is not configured".to_string())
        })?;

        let hit = geocoder.search(query).await.map_err(|e| {
            warn!(error = %e, query, "geocoding failed");
            DiscoveryError::from(e)
        })?;

        self.state.write().await.set_map_center(hit.location);
        debug!(location = %hit.location, "map recentred");
        Ok(hit)
    }

    /// Forget persisted data and return to the seed list.
    ///
    /// Any live search still in flight is superseded.
    pub async fn clear(&self) {
        for key in [ALL_FACILITIES_KEY, USER_LOCATION_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(error = %e, key, "failed to clear stored value");
            }
        }
        let seed = self.seed_candidates().await;
        self.state.write().await.reset(seed, CandidateOrigin::Seed);
        info!("discovery state cleared");
    }

    pub async fn toggle_type(&self, label: &str) -> bool {
        self.state.write().await.toggle_type(label)
    }

    pub async fn select_all_types(&self) {
        self.state.write().await.select_all_types();
    }

    pub async fn clear_types(&self) {
        self.state.write().await.clear_types();
    }

    pub async fn toggle_facility(&self, id: &FacilityId) -> Result<bool, DiscoveryError> {
        self.state.write().await.toggle_facility(id)
    }

    pub async fn ranked(&self) -> Vec<Facility> {
        self.state.read().await.ranked()
    }

    pub async fn visible(&self) -> Vec<Facility> {
        self.state.read().await.visible()
    }

    pub async fn markers(&self) -> MarkerPlan {
        self.state.read().await.markers().clone()
    }

    pub async fn snapshot(&self) -> DiscoverySnapshot {
        let state = self.state.read().await;
        DiscoverySnapshot {
            origin: state.origin(),
            located_at: state.located_at(),
            map_center: state.map_center(),
            candidate_origin: state.candidate_origin(),
            searching: state.is_searching(),
            types: state.type_universe().into_iter().collect(),
            filter: state.filter().clone(),
            facilities: state.visible(),
        }
    }
}

/// Releases the searching flag if a search future is dropped mid-flight.
struct SearchGuard {
    state: Arc<RwLock<DiscoveryState>>,
    ticket: Option<SearchTicket>,
}

impl SearchGuard {
    fn new(state: Arc<RwLock<DiscoveryState>>, ticket: SearchTicket) -> Self {
        Self {
            state,
            ticket: Some(ticket),
        }
    }

    fn disarm(&mut self) {
        self.ticket = None;
    }
}

impl Drop for SearchGuard {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };

        debug!(ticket = ticket.value(), "search abandoned");
        if let Ok(mut state) = self.state.try_write() {
            state.finish_search(ticket);
            return;
        }

        let state = self.state.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    state.write().await.finish_search(ticket);
                });
            }
            Err(_) => warn!("search abandoned outside a runtime, searching flag left set"),
        }
    }
}
