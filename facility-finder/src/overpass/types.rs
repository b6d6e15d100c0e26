//! Overpass API response DTOs.
//!
//! Elements are kept as raw JSON until each one is parsed on its own, so a
//! single malformed element cannot fail the whole response.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level `[out:json]` response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    /// Raw elements, parsed individually by [`Element::parse`].
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,

    /// Server-side remark, present when the query timed out or errored.
    pub remark: Option<String>,
}

/// A latitude/longitude pair as Overpass spells it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// One element before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    /// "node", "way" or "relation".
    #[serde(rename = "type")]
    pub element_type: Option<String>,

    pub id: i64,

    /// Present on nodes.
    pub lat: Option<f64>,

    /// Present on nodes.
    pub lon: Option<f64>,

    /// Present on ways/relations requested with `out center`.
    pub center: Option<LatLon>,

    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// A validated element with a resolvable position.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Point feature with its own coordinates.
    Point {
        element_type: Option<String>,
        id: i64,
        position: LatLon,
        tags: HashMap<String, String>,
    },

    /// Area feature positioned by its computed centre.
    Area {
        element_type: Option<String>,
        id: i64,
        center: LatLon,
        tags: HashMap<String, String>,
    },
}

impl Element {
    /// Parse one raw JSON element.
    ///
    /// Returns `None` if the element is malformed or has no usable
    /// position. Direct coordinates win over a centre when both exist.
    pub fn parse(value: serde_json::Value) -> Option<Self> {
        let raw: RawElement = serde_json::from_value(value).ok()?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawElement) -> Option<Self> {
        match (raw.lat, raw.lon, raw.center) {
            (Some(lat), Some(lon), _) => Some(Element::Point {
                element_type: raw.element_type,
                id: raw.id,
                position: LatLon { lat, lon },
                tags: raw.tags,
            }),
            (_, _, Some(center)) => Some(Element::Area {
                element_type: raw.element_type,
                id: raw.id,
                center,
                tags: raw.tags,
            }),
            _ => None,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Element::Point { id, .. } | Element::Area { id, .. } => *id,
        }
    }

    /// "node", "way" or "relation", when the server said so.
    pub fn element_type(&self) -> Option<&str> {
        match self {
            Element::Point { element_type, .. } | Element::Area { element_type, .. } => {
                element_type.as_deref()
            }
        }
    }

    pub fn position(&self) -> LatLon {
        match self {
            Element::Point { position, .. } => *position,
            Element::Area { center, .. } => *center,
        }
    }

    pub fn tags(&self) -> &HashMap<String, String> {
        match self {
            Element::Point { tags, .. } | Element::Area { tags, .. } => tags,
        }
    }

    /// Look up a tag, ignoring blank values.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags()
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}
