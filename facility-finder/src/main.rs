use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use facility_finder::config::AppConfig;
use facility_finder::directory::{DirectoryClient, DirectoryClientConfig};
use facility_finder::discovery::{Discovery, DiscoverySettings};
use facility_finder::geocode::{CachedGeocoder, GeocodeCacheConfig, NominatimClient, NominatimConfig};
use facility_finder::geolocation::{DevicePosition, Geolocator};
use facility_finder::overpass::{OverpassClient, OverpassConfig};
use facility_finder::store::{FileStore, KeyValueStore, MemoryStore};
use facility_finder::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("facility_finder=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let store: Arc<dyn KeyValueStore> = match &config.store_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "using file store");
            Arc::new(FileStore::new(dir))
        }
        None => {
            info!("using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let position = match config.device_location {
        Some(location) => DevicePosition::Fixed(location),
        None => {
            warn!("DEVICE_LAT/DEVICE_LNG not set, geolocation unavailable");
            DevicePosition::Unsupported
        }
    };
    let geolocator = Geolocator::new(position, store.clone());

    let directory = DirectoryClient::new(
        DirectoryClientConfig::new(&config.directory_url).with_timeout(config.http_timeout_secs),
    )?;

    let mut overpass_config = OverpassConfig::new().with_timeout(config.http_timeout_secs);
    if let Some(url) = &config.overpass_url {
        overpass_config = overpass_config.with_base_url(url);
    }
    if let Some(agent) = &config.user_agent {
        overpass_config = overpass_config.with_user_agent(agent);
    }
    let live = OverpassClient::new(overpass_config)?;

    let mut nominatim_config = NominatimConfig::new().with_timeout(config.http_timeout_secs);
    if let Some(url) = &config.nominatim_url {
        nominatim_config = nominatim_config.with_base_url(url);
    }
    if let Some(agent) = &config.user_agent {
        nominatim_config = nominatim_config.with_user_agent(agent);
    }
    let geocoder = CachedGeocoder::new(
        NominatimClient::new(nominatim_config)?,
        &GeocodeCacheConfig::default(),
    );

    let discovery = Discovery::new(geolocator, directory, live, store)
        .with_geocoder(geocoder)
        .with_settings(DiscoverySettings {
            radius_meters: config.search_radius_m,
            merge_seed: config.merge_seed,
            ..DiscoverySettings::default()
        });
    discovery.restore().await;

    let app = create_router(AppState::new(discovery));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "facility finder listening");
    info!(directory = %config.directory_url, radius_m = config.search_radius_m, "sources configured");

    axum::serve(listener, app).await?;
    Ok(())
}
