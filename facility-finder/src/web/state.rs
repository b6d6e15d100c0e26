//! Application state for the web layer.

use std::sync::Arc;

use crate::directory::DirectoryClient;
use crate::discovery::Discovery;
use crate::geolocation::DevicePosition;
use crate::overpass::OverpassClient;

/// The discovery service as wired by the server.
pub type AppDiscovery = Discovery<DevicePosition, DirectoryClient, OverpassClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub discovery: Arc<AppDiscovery>,
}

impl AppState {
    pub fn new(discovery: AppDiscovery) -> Self {
        Self {
            discovery: Arc::new(discovery),
        }
    }
}
