//! Domain types for facility discovery.
//!
//! Facilities and user locations are validated at construction time, so
//! code that receives these types can trust their coordinates.

mod facility;
mod label;
mod location;

pub use facility::{Facility, FacilityId, GENERIC_FACILITY_NAME, GENERIC_FACILITY_TYPE};
pub use label::{capitalize, normalize_type_label};
pub use location::{InvalidLocation, UserLocation, coordinates_valid};
