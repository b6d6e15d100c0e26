//! Caching layer for geocoding lookups.
//!
//! Search-box queries repeat often within a session. Results are cached
//! by normalized query text; misses and errors are not cached.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use super::client::{GeocodeHit, NominatimClient};
use super::error::GeocodeError;

/// Configuration for the geocode cache.
#[derive(Debug, Clone)]
pub struct GeocodeCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for GeocodeCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Nominatim client with caching.
#[derive(Clone)]
pub struct CachedGeocoder {
    client: NominatimClient,
    cache: MokaCache<String, GeocodeHit>,
}

impl CachedGeocoder {
    pub fn new(client: NominatimClient, config: &GeocodeCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, cache }
    }

    /// Cache key: trimmed, lowercased, inner whitespace collapsed.
    fn cache_key(query: &str) -> String {
        query
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Resolve a query, using the cache if available.
    pub async fn search(&self, query: &str) -> Result<GeocodeHit, GeocodeError> {
        let key = Self::cache_key(query);
        if key.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        if let Some(hit) = self.cache.get(&key).await {
            debug!(query = %key, "geocode cache hit");
            return Ok(hit);
        }

        let hit = self.client.search(query).await?;
        self.cache.insert(key, hit.clone()).await;
        Ok(hit)
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::NominatimConfig;

    #[test]
    fn cache_key_normalizes() {
        assert_eq!(CachedGeocoder::cache_key("  MG   Road "), "mg road");
        assert_eq!(CachedGeocoder::cache_key("Koramangala"), "koramangala");
        assert_eq!(CachedGeocoder::cache_key("   "), "");
    }

    #[test]
    fn default_config() {
        let config = GeocodeCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn cache_starts_empty() {
        let client = NominatimClient::new(NominatimConfig::new()).unwrap();
        let geocoder = CachedGeocoder::new(client, &GeocodeCacheConfig::default());
        assert_eq!(geocoder.cache_entry_count(), 0);
        assert!(matches!(
            geocoder.search("").await,
            Err(GeocodeError::EmptyQuery)
        ));
    }
}
