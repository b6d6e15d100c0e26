//! Overpass API live search.
//!
//! Queries OpenStreetMap for healthcare amenities around a point and
//! turns the loosely-typed element list into [`Facility`] records.
//!
//! Key characteristics of Overpass responses:
//! - Nodes carry `lat`/`lon` directly; ways and relations only carry a
//!   `center` object when the query ends in `out center;`
//! - All descriptive data lives in a free-form `tags` map
//! - Element IDs are only unique per element type
//!
//! [`Facility`]: crate::domain::Facility

mod client;
mod convert;
mod error;
mod query;
mod types;

pub use client::{OverpassClient, OverpassConfig};
pub use convert::{facilities_from_response, facility_from_element};
pub use error::OverpassError;
pub use query::{DEFAULT_CATEGORIES, DEFAULT_RADIUS_METERS, build_query};
pub use types::{Element, LatLon, OverpassResponse, RawElement};
