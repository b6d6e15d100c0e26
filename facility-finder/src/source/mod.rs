//! Facility acquisition strategies.
//!
//! Three interchangeable sources produce the same `Vec<Facility>` shape:
//! the bundled seed list, the same-origin directory and the live Overpass
//! search. The discovery service is generic over [`FacilitySource`] so each
//! strategy can be swapped for a test double.

mod seed;

pub use seed::{SeedSource, seed_facilities};

use std::collections::HashSet;
use std::future::Future;

use crate::directory::{DirectoryClient, DirectoryError};
use crate::domain::{Facility, UserLocation};
use crate::overpass::{DEFAULT_CATEGORIES, DEFAULT_RADIUS_METERS, OverpassClient, OverpassError};

/// Parameters for a fetch. Sources ignore what they do not need.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceQuery {
    /// Search centre; required by the live source.
    pub center: Option<UserLocation>,

    pub radius_meters: u32,

    /// Amenity categories for the live source.
    pub categories: Vec<String>,
}

impl SourceQuery {
    /// Query with default radius and categories.
    pub fn new(center: Option<UserLocation>) -> Self {
        Self {
            center,
            radius_meters: DEFAULT_RADIUS_METERS,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn with_radius(mut self, radius_meters: u32) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }
}

/// Error from a facility source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Live(#[from] OverpassError),

    /// The live source was asked to search without a centre
    #[error("live search needs a centre location")]
    MissingCenter,
}

/// A strategy that produces candidate facilities.
pub trait FacilitySource: Send + Sync {
    fn fetch(
        &self,
        query: &SourceQuery,
    ) -> impl Future<Output = Result<Vec<Facility>, SourceError>> + Send;
}

impl FacilitySource for DirectoryClient {
    async fn fetch(&self, _query: &SourceQuery) -> Result<Vec<Facility>, SourceError> {
        Ok(self.fetch_facility_directory().await?)
    }
}

impl FacilitySource for OverpassClient {
    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<Facility>, SourceError> {
        let center = query.center.ok_or(SourceError::MissingCenter)?;
        Ok(self
            .search_nearby(&center, query.radius_meters, &query.categories)
            .await?)
    }
}

/// Combine seed and live candidates.
///
/// Live entries come first and win on ID collisions; remaining seed
/// entries follow in their original order.
pub fn merge_candidates(seed: Vec<Facility>, live: Vec<Facility>) -> Vec<Facility> {
    let mut seen = HashSet::new();
    live.into_iter()
        .chain(seed)
        .filter(|facility| seen.insert(facility.id.clone()))
        .collect()
}
