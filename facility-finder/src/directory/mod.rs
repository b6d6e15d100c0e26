//! Same-origin facility directory client.
//!
//! Fetches the listing served at `/api/health-centers`. Callers treat any
//! failure as recoverable and fall back to the bundled seed list.

mod client;
mod error;

pub use client::{DIRECTORY_PATH, DirectoryClient, DirectoryClientConfig, FacilityDto};
pub use error::DirectoryError;
