//! Nearby-facility discovery.
//!
//! Ties the pipeline together: geolocation, a facility source, distance
//! ranking, then type filtering and the marker plan. State lives behind a
//! lock that is never held across an await; live searches carry a ticket
//! so a late completion cannot overwrite newer state.

mod error;
mod service;
mod state;

pub use error::{DiscoveryError, Notice, NoticeLevel};
pub use service::{Discovery, DiscoverySettings, DiscoverySnapshot, LoadOutcome, SearchOutcome};
pub use state::{CandidateOrigin, DiscoveryState, RequestSeq, SearchTicket};
