//! Overpass QL query construction.

use crate::domain::UserLocation;

use super::error::OverpassError;

/// Amenity values searched for by default.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "hospital",
    "clinic",
    "pharmacy",
    "doctors",
    "health_care",
    "dentist",
];

/// Default search radius around the user.
pub const DEFAULT_RADIUS_METERS: u32 = 11_000;

/// Build the Overpass QL query for amenities around `center`.
///
/// Nodes, ways and relations are all requested; `out center;` makes the
/// server attach a centroid to area features.
pub fn build_query(
    center: &UserLocation,
    radius_meters: u32,
    categories: &[String],
) -> Result<String, OverpassError> {
    if categories.is_empty() {
        return Err(OverpassError::InvalidQuery(
            "at least one category is required".to_string(),
        ));
    }

    if let Some(bad) = categories.iter().find(|c| !is_plain_tag_value(c)) {
        return Err(OverpassError::InvalidQuery(format!(
            "unsupported category {bad:?}"
        )));
    }

    let pattern = categories.join("|");
    let around = format!("(around:{},{},{})", radius_meters, center.lat, center.lng);

    let mut query = String::from("[out:json];\n(\n");
    for element in ["node", "way", "relation"] {
        query.push_str(&format!(
            "  {element}[\"amenity\"~\"{pattern}\"]{around};\n"
        ));
    }
    query.push_str(");\nout center;");

    Ok(query)
}

/// Tag values are interpolated into a regex inside a quoted string.
fn is_plain_tag_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ':')
}
