//! Facility type labels.
//!
//! Raw categories come from two places: hand-written seed data ("PHC",
//! "Private Hospital") and capitalized OSM amenity tags ("Health_care").
//! Filtering and marker styling operate on the normalized display label.

/// Display label substitutions for known abbreviations.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("PHC", "Health Centers"),
    ("CHC", "Community Health Centers"),
];

/// Normalize a raw facility type into its display label.
///
/// # Examples
///
/// ```
/// use facility_finder::domain::normalize_type_label;
///
/// assert_eq!(normalize_type_label("PHC"), "Health Centers");
/// assert_eq!(normalize_type_label("Health_care"), "Health care");
/// assert_eq!(normalize_type_label("Clinic"), "Clinic");
/// ```
pub fn normalize_type_label(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some((_, label)) = ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(trimmed))
    {
        return (*label).to_string();
    }

    trimmed.replace('_', " ")
}

/// Uppercase the first character of a raw OSM tag value.
///
/// The rest of the value is left untouched: `"health_care"` becomes
/// `"Health_care"`.
pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
