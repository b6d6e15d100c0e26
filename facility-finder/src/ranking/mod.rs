//! Distance computation and ranking of candidate facilities.
//!
//! Ranking is pure: it annotates each facility with its great-circle
//! distance from the user and sorts nearest-first. It never drops a
//! facility; radius limits are applied separately, and only to live
//! search results.

mod distance;
mod rank;

pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use rank::{rank, within_radius};
