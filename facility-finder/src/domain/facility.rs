//! Healthcare facility records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::label::normalize_type_label;
use super::location::{InvalidLocation, UserLocation, coordinates_valid};

/// Name shown when a source has no usable name for a facility.
pub const GENERIC_FACILITY_NAME: &str = "Medical Facility";

/// Type shown when a source has no category for a facility.
pub const GENERIC_FACILITY_TYPE: &str = "Healthcare";

/// Identifier of a facility, unique within one candidate set.
///
/// Live-search IDs are provider-assigned and reused as-is, so the same
/// value may refer to a different place after another search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(String);

impl FacilityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FacilityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A healthcare point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: FacilityId,

    pub name: String,

    /// Free-text category, e.g. "Private Hospital", "Clinic", "PHC".
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    pub lat: f64,
    pub lng: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Capability tags, in source order. Never truncated here.
    #[serde(default)]
    pub services: Vec<String>,

    /// Great-circle distance from the user in kilometres.
    /// Absent until a user location is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Facility {
    /// Create a facility with the required fields.
    ///
    /// Fails if the coordinates are not displayable.
    pub fn new(
        id: impl Into<FacilityId>,
        name: impl Into<String>,
        kind: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> Result<Self, InvalidLocation> {
        UserLocation::new(lat, lng)?;

        Ok(Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            address: None,
            lat,
            lng,
            phone: None,
            email: None,
            website: None,
            services: Vec::new(),
            distance: None,
        })
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    /// Whether both coordinates are finite and in range.
    pub fn is_displayable(&self) -> bool {
        coordinates_valid(self.lat, self.lng)
    }

    /// The facility's position, if displayable.
    pub fn location(&self) -> Option<UserLocation> {
        UserLocation::new(self.lat, self.lng).ok()
    }

    /// The normalized type label used for filtering and display.
    pub fn display_label(&self) -> String {
        normalize_type_label(&self.kind)
    }

    /// The first `n` services, for compact display.
    pub fn services_preview(&self, n: usize) -> &[String] {
        &self.services[..self.services.len().min(n)]
    }
}

impl From<String> for FacilityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clinic() -> Facility {
        Facility::new("7", "City Clinic", "Clinic", 12.97, 77.59)
            .unwrap()
            .with_services(["General Medicine", "Pediatrics", "Vaccination"])
    }

    #[test]
    fn new_rejects_invalid_coordinates() {
        assert!(Facility::new("1", "A", "Clinic", f64::NAN, 0.0).is_err());
        assert!(Facility::new("1", "A", "Clinic", 0.0, 200.0).is_err());
    }

    #[test]
    fn display_label_is_normalized() {
        let phc = Facility::new("1", "Ward PHC", "PHC", 12.9, 77.6).unwrap();
        assert_eq!(phc.display_label(), "Health Centers");
        assert_eq!(clinic().display_label(), "Clinic");
    }

    #[test]
    fn services_preview_does_not_truncate_list() {
        let facility = clinic();
        assert_eq!(facility.services_preview(2), ["General Medicine", "Pediatrics"]);
        assert_eq!(facility.services_preview(10).len(), 3);
        assert_eq!(facility.services.len(), 3);
    }

    #[test]
    fn json_uses_type_and_omits_absent_fields() {
        let json = serde_json::to_value(clinic()).unwrap();
        assert_eq!(json["type"], "Clinic");
        assert_eq!(json["id"], "7");
        assert!(json.get("distance").is_none());
        assert!(json.get("address").is_none());
    }

    #[test]
    fn json_roundtrip_preserves_fields() {
        let mut facility = clinic()
            .with_address("MG Road")
            .with_phone("+91 80 1234 5678")
            .with_website("https://example.org");
        facility.distance = Some(1.234_567_891_234);

        let json = serde_json::to_string(&facility).unwrap();
        let back: Facility = serde_json::from_str(&json).unwrap();
        assert_eq!(back, facility);
    }

    #[test]
    fn displayable_check() {
        let mut facility = clinic();
        assert!(facility.is_displayable());
        facility.lat = f64::NAN;
        assert!(!facility.is_displayable());
        assert!(facility.location().is_none());
    }
}
