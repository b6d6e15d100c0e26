//! Nominatim search client.

use serde::Deserialize;

use crate::domain::UserLocation;

use super::error::GeocodeError;

/// Default public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying User-Agent.
const DEFAULT_USER_AGENT: &str = concat!("facility-finder/", env!("CARGO_PKG_VERSION"));

/// One search result. Nominatim encodes coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
struct SearchResultDto {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// A resolved place.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeHit {
    pub location: UserLocation,
    pub display_name: Option<String>,
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL (without `/search`)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl NominatimConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for Nominatim free-text search.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve free text to the first matching place.
    pub async fn search(&self, query: &str) -> Result<GeocodeHit, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let results: Vec<SearchResultDto> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        first_hit(results).ok_or_else(|| GeocodeError::NotFound {
            query: query.to_string(),
        })
    }
}

/// The first result with parseable, valid coordinates.
fn first_hit(results: Vec<SearchResultDto>) -> Option<GeocodeHit> {
    let first = results.into_iter().next()?;
    let lat: f64 = first.lat.trim().parse().ok()?;
    let lng: f64 = first.lon.trim().parse().ok()?;

    Some(GeocodeHit {
        location: UserLocation::new(lat, lng).ok()?,
        display_name: first.display_name,
    })
}
