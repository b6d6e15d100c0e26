//! Directory HTTP client.

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Facility, FacilityId, GENERIC_FACILITY_NAME, GENERIC_FACILITY_TYPE};

use super::error::DirectoryError;

/// Path of the listing endpoint, relative to the site origin.
pub const DIRECTORY_PATH: &str = "/api/health-centers";

/// Directory IDs may be JSON strings or numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum DtoId {
    Text(String),
    Number(i64),
}

/// Loose wire shape of a directory entry.
///
/// Everything except `id` is optional on the wire; entries that cannot
/// become a displayable [`Facility`] are dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityDto {
    id: DtoId,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
}

impl FacilityDto {
    /// Validate into a facility, or `None` if a coordinate is missing or invalid.
    pub fn into_facility(self) -> Option<Facility> {
        let id = match self.id {
            DtoId::Text(s) => FacilityId::new(s),
            DtoId::Number(n) => FacilityId::new(n.to_string()),
        };

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FACILITY_NAME.to_string());

        let mut facility = Facility::new(
            id,
            name,
            self.kind
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FACILITY_TYPE.to_string()),
            self.lat?,
            self.lng?,
        )
        .ok()?;

        facility.address = self.address;
        facility.phone = self.phone;
        facility.email = self.email;
        facility.website = self.website;
        facility.services = self.services;
        Some(facility)
    }
}

/// Configuration for the directory client.
#[derive(Debug, Clone)]
pub struct DirectoryClientConfig {
    /// Site origin, e.g. `http://127.0.0.1:3000`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectoryClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the same-origin facility listing.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(config: DirectoryClientConfig) -> Result<Self, DirectoryError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the facility directory.
    ///
    /// Any status other than 200 is an error. Entries without coordinates are
    /// dropped rather than failing the whole listing.
    pub async fn fetch_facility_directory(&self) -> Result<Vec<Facility>, DirectoryError> {
        let url = format!("{}{}", self.base_url, DIRECTORY_PATH);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let entries: Vec<FacilityDto> =
            serde_json::from_str(&body).map_err(|e| DirectoryError::Json {
                message: e.to_string(),
            })?;

        let total = entries.len();
        let facilities: Vec<Facility> = entries
            .into_iter()
            .filter_map(FacilityDto::into_facility)
            .collect();

        debug!(total, kept = facilities.len(), "fetched facility directory");
        Ok(facilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dto(value: serde_json::Value) -> FacilityDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numeric_and_string_ids() {
        let f = dto(json!({"id": 3, "name": "A", "type": "Clinic", "lat": 1.0, "lng": 2.0}))
            .into_facility()
            .unwrap();
        assert_eq!(f.id.as_str(), "3");

        let f = dto(json!({"id": "x-1", "name": "A", "type": "Clinic", "lat": 1.0, "lng": 2.0}))
            .into_facility()
            .unwrap();
        assert_eq!(f.id.as_str(), "x-1");
    }

    #[test]
    fn missing_coordinate_dropped() {
        assert!(dto(json!({"id": 1, "name": "A", "lat": 1.0})).into_facility().is_none());
        assert!(dto(json!({"id": 1, "name": "A", "lng": 1.0})).into_facility().is_none());
        assert!(
            dto(json!({"id": 1, "name": "A", "lat": 100.0, "lng": 1.0}))
                .into_facility()
                .is_none()
        );
    }

    #[test]
    fn missing_name_and_type_use_generic_labels() {
        let f = dto(json!({"id": 1, "lat": 1.0, "lng": 2.0}))
            .into_facility()
            .unwrap();
        assert_eq!(f.name, "Medical Facility");
        assert_eq!(f.kind, "Healthcare");
    }

    #[test]
    fn optional_fields_carried_over() {
        let f = dto(json!({
            "id": 1, "name": "A", "type": "PHC", "lat": 1.0, "lng": 2.0,
            "address": "Main St", "phone": "1", "email": "a@b", "website": "w",
            "services": ["Immunization", "Maternal Care"]
        }))
        .into_facility()
        .unwrap();

        assert_eq!(f.address.as_deref(), Some("Main St"));
        assert_eq!(f.services, ["Immunization", "Maternal Care"]);
        assert!(f.distance.is_none());
    }

    #[test]
    fn config_trims_trailing_slash() {
        let client = DirectoryClient::new(DirectoryClientConfig::new("http://localhost:3000/"))
            .unwrap();
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
