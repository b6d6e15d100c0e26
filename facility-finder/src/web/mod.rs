//! Web layer for facility discovery.
//!
//! Exposes the discovery engine as a JSON API and serves the same-origin
//! facility directory.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppDiscovery, AppState};
