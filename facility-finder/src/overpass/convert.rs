//! Conversion from Overpass elements to facilities.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{
    Facility, FacilityId, GENERIC_FACILITY_NAME, GENERIC_FACILITY_TYPE, capitalize,
};

use super::types::{Element, OverpassResponse};

/// Convert a validated element into a facility.
///
/// Returns `None` if the element's position is not displayable.
pub fn facility_from_element(element: &Element) -> Option<Facility> {
    let position = element.position();

    let name = element
        .tag("name")
        .or_else(|| element.tag("operator"))
        .or_else(|| element.tag("brand"))
        .unwrap_or(GENERIC_FACILITY_NAME);

    let kind = element
        .tag("amenity")
        .map(capitalize)
        .unwrap_or_else(|| GENERIC_FACILITY_TYPE.to_string());

    let mut facility = Facility::new(
        FacilityId::new(element.id().to_string()),
        name,
        kind,
        position.lat,
        position.lon,
    )
    .ok()?;

    facility.address = address(element);
    facility.phone = first_tag(element, &["phone", "contact:phone"]);
    facility.email = first_tag(element, &["email", "contact:email"]);
    facility.website = first_tag(element, &["website", "contact:website"]);
    facility.services = element
        .tag("healthcare")
        .map(|s| vec![s.to_string()])
        .unwrap_or_default();

    Some(facility)
}

/// Convert every usable element of a response, in response order.
///
/// Elements that fail to parse or lack a position are skipped. OSM IDs are
/// only unique per element type, so an element whose bare ID is already
/// taken by another type is keyed as `"{type}/{id}"`. An element repeated
/// with the same type and ID is kept once.
pub fn facilities_from_response(response: OverpassResponse) -> Vec<Facility> {
    let total = response.elements.len();
    let mut seen = HashSet::new();
    let mut ids = HashSet::new();
    let mut facilities = Vec::new();

    for element in response.elements.into_iter().filter_map(Element::parse) {
        let element_type = element.element_type().unwrap_or("element").to_string();
        if !seen.insert((element_type.clone(), element.id())) {
            continue;
        }
        let Some(mut facility) = facility_from_element(&element) else {
            continue;
        };
        if !ids.insert(facility.id.clone()) {
            facility.id = FacilityId::new(format!("{element_type}/{}", element.id()));
            ids.insert(facility.id.clone());
        }
        facilities.push(facility);
    }

    if facilities.len() < total {
        debug!(
            total,
            kept = facilities.len(),
            "discarded unusable or repeated Overpass elements"
        );
    }

    facilities
}

fn first_tag(element: &Element, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| element.tag(key))
        .map(str::to_string)
}

/// Assemble a one-line address from `addr:*` tags.
fn address(element: &Element) -> Option<String> {
    if let Some(full) = element.tag("addr:full") {
        return Some(full.to_string());
    }

    let street = match (element.tag("addr:housenumber"), element.tag("addr:street")) {
        (Some(number), Some(street)) => Some(format!("{number} {street}")),
        (None, Some(street)) => Some(street.to_string()),
        _ => None,
    };

    let parts: Vec<String> = [
        street,
        element.tag("addr:city").map(str::to_string),
        element.tag("addr:postcode").map(str::to_string),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
