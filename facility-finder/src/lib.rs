//! Nearby healthcare facility discovery.
//!
//! Finds the user's position, gathers candidate facilities from seed data,
//! a same-origin directory or a live Overpass search, ranks them by
//! distance and narrows them by type for display on a map.

pub mod config;
pub mod directory;
pub mod discovery;
pub mod domain;
pub mod filter;
pub mod geocode;
pub mod geolocation;
pub mod markers;
pub mod overpass;
pub mod ranking;
pub mod source;
pub mod store;
pub mod web;
