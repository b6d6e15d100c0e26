//! Map marker plan.
//!
//! The map itself is rendered elsewhere. This module decides which pins
//! exist and how they look; the renderer replaces every non-base marker
//! with the latest plan.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{Facility, FacilityId, UserLocation};

/// Marker style, chosen from a facility's normalized type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    Hospital,
    HealthCenter,
    Clinic,
    Pharmacy,
    Dentist,
    Generic,
}

impl MarkerIcon {
    pub fn for_label(label: &str) -> Self {
        let label = label.to_ascii_lowercase();
        if label.contains("hospital") {
            Self::Hospital
        } else if label.contains("health center") {
            Self::HealthCenter
        } else if label.contains("clinic") || label.contains("doctor") {
            Self::Clinic
        } else if label.contains("pharmacy") {
            Self::Pharmacy
        } else if label.contains("dentist") || label.contains("dental") {
            Self::Dentist
        } else {
            Self::Generic
        }
    }

    /// Pin colour when not highlighted.
    pub fn color(self) -> &'static str {
        match self {
            Self::Hospital => "red",
            Self::HealthCenter => "green",
            Self::Clinic => "blue",
            Self::Pharmacy => "violet",
            Self::Dentist => "orange",
            Self::Generic => "grey",
        }
    }
}

/// Colour of selected facilities and of the user's own marker.
pub const HIGHLIGHT_COLOR: &str = "gold";
pub const USER_MARKER_COLOR: &str = "black";

/// Services shown in a marker popup; the facility keeps the full list.
pub const MARKER_SERVICES_SHOWN: usize = 3;

/// One facility pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub facility_id: FacilityId,
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub label: String,
    pub icon: MarkerIcon,
    pub color: &'static str,
    pub highlighted: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Marker {
    fn for_facility(facility: &Facility, highlighted: bool) -> Self {
        let label = facility.display_label();
        let icon = MarkerIcon::for_label(&label);
        Self {
            facility_id: facility.id.clone(),
            lat: facility.lat,
            lng: facility.lng,
            title: facility.name.clone(),
            label,
            icon,
            color: if highlighted { HIGHLIGHT_COLOR } else { icon.color() },
            highlighted,
            services: facility.services_preview(MARKER_SERVICES_SHOWN).to_vec(),
            distance: facility.distance,
        }
    }
}

/// The user's position pin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UserMarker {
    pub lat: f64,
    pub lng: f64,
    pub color: &'static str,
}

/// A complete set of markers for one redraw.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerPlan {
    /// Incremented on every redraw; a renderer skips plans it already drew.
    pub generation: u64,
    pub user: Option<UserMarker>,
    pub markers: Vec<Marker>,
}

/// Build the markers for `visible` facilities.
///
/// Facilities without displayable coordinates get no pin.
pub fn plan_markers(
    visible: &[Facility],
    selected: &BTreeSet<FacilityId>,
    user: Option<&UserLocation>,
) -> (Option<UserMarker>, Vec<Marker>) {
    let markers = visible
        .iter()
        .filter(|f| f.is_displayable())
        .map(|f| Marker::for_facility(f, selected.contains(&f.id)))
        .collect();

    let user = user.map(|location| UserMarker {
        lat: location.lat,
        lng: location.lng,
        color: USER_MARKER_COLOR,
    });

    (user, markers)
}

/// Holds the last drawn plan.
#[derive(Debug, Default)]
pub struct MarkerLayer {
    current: MarkerPlan,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every marker and rebuild the full set.
    pub fn redraw(
        &mut self,
        visible: &[Facility],
        selected: &BTreeSet<FacilityId>,
        user: Option<&UserLocation>,
    ) -> &MarkerPlan {
        let (user, markers) = plan_markers(visible, selected, user);
        self.current = MarkerPlan {
            generation: self.current.generation + 1,
            user,
            markers,
        };
        &self.current
    }

    pub fn current(&self) -> &MarkerPlan {
        &self.current
    }
}
