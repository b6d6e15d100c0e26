//! Overpass HTTP client.

use tracing::{debug, warn};

use crate::domain::{Facility, UserLocation};

use super::convert::facilities_from_response;
use super::error::OverpassError;
use super::query::build_query;
use super::types::OverpassResponse;

/// Default public Overpass interpreter endpoint.
const DEFAULT_BASE_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default User-Agent; the public instances ask clients to identify themselves.
const DEFAULT_USER_AGENT: &str = concat!("facility-finder/", env!("CARGO_PKG_VERSION"));

/// Configuration for the Overpass client.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter URL (the query goes in the `data` parameter)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl OverpassConfig {
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

impl Default for OverpassConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Overpass API.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    base_url: String,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, OverpassError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Search for healthcare amenities within `radius_meters` of `center`.
    ///
    /// Elements without a resolvable position are discarded. The radius is
    /// only sent to the server, not re-checked here.
    pub async fn search_nearby(
        &self,
        center: &UserLocation,
        radius_meters: u32,
        categories: &[String],
    ) -> Result<Vec<Facility>, OverpassError> {
        let query = build_query(center, radius_meters, categories)?;
        debug!(%center, radius_meters, "querying Overpass");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OverpassError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OverpassError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OverpassError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        if let Some(remark) = parsed.remark.as_deref() {
            if is_runtime_error(remark) {
                return Err(OverpassError::QueryFailed(remark.to_string()));
            }
            warn!(remark = %remark, "Overpass returned a remark");
        }

        Ok(facilities_from_response(parsed))
    }
}

/// Overpass reports timeouts and memory exhaustion this way, with a 200
/// status and a partial or empty element list.
fn is_runtime_error(remark: &str) -> bool {
    remark.trim_start().starts_with("runtime error")
}
