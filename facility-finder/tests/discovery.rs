//! End-to-end discovery flows against mocked upstreams.

use std::sync::Arc;

use facility_finder::directory::{DIRECTORY_PATH, DirectoryClient, DirectoryClientConfig};
use facility_finder::discovery::{CandidateOrigin, Discovery, DiscoveryError, SearchOutcome};
use facility_finder::domain::UserLocation;
use facility_finder::geocode::{CachedGeocoder, GeocodeCacheConfig, NominatimClient, NominatimConfig};
use facility_finder::geolocation::{DevicePosition, Geolocator};
use facility_finder::overpass::{OverpassClient, OverpassConfig};
use facility_finder::source::seed_facilities;
use facility_finder::store::{ALL_FACILITIES_KEY, FileStore, KeyValueStore, MemoryStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type LiveDiscovery = Discovery<DevicePosition, DirectoryClient, OverpassClient>;

fn bangalore() -> UserLocation {
    UserLocation::new(12.9716, 77.5946).unwrap()
}

fn discovery(server: &MockServer, store: Arc<dyn KeyValueStore>) -> LiveDiscovery {
    let directory =
        DirectoryClient::new(DirectoryClientConfig::new(server.uri()).with_timeout(5)).unwrap();
    let live = OverpassClient::new(
        OverpassConfig::new()
            .with_base_url(format!("{}/api/interpreter", server.uri()))
            .with_timeout(5),
    )
    .unwrap();
    let geocoder = CachedGeocoder::new(
        NominatimClient::new(NominatimConfig::new().with_base_url(server.uri())).unwrap(),
        &GeocodeCacheConfig::default(),
    );

    Discovery::new(
        Geolocator::new(DevicePosition::Fixed(bangalore()), store.clone()),
        directory,
        live,
        store,
    )
    .with_geocoder(geocoder)
}

fn overpass_body() -> serde_json::Value {
    serde_json::json!({
        "elements": [
            {"type": "node", "id": 1, "lat": 13.0, "lon": 77.5946, "tags": {"amenity": "clinic"}},
            {"type": "way", "id": 2, "center": {"lat": 12.98, "lon": 77.5946}, "tags": {"amenity": "hospital", "name": "Near Hospital"}}
        ]
    })
}

#[tokio::test]
async fn live_search_then_network_failure_clears_cache() {
    let server = MockServer::start().await;
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let discovery = discovery(&server, store.clone());

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overpass_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    discovery.locate().await.unwrap();
    let outcome = discovery.search_nearby(None, None).await.unwrap();
    assert_eq!(outcome, SearchOutcome::Completed { count: 2, dropped: 0 });

    let visible = discovery.visible().await;
    assert_eq!(visible[0].name, "Near Hospital");
    assert!(visible[0].distance.unwrap() < visible[1].distance.unwrap());
    assert!(store.get(ALL_FACILITIES_KEY).unwrap().is_some());

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = discovery.search_nearby(None, None).await.unwrap_err();
    assert!(matches!(err, DiscoveryError::LiveSearchFailed(_)));
    assert!(discovery.visible().await.is_empty());
    assert!(store.get(ALL_FACILITIES_KEY).unwrap().is_none());
}

#[tokio::test]
async fn cached_results_survive_restart() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overpass_body()))
        .mount(&server)
        .await;

    let first = discovery(&server, Arc::new(FileStore::new(dir.path())));
    first.locate().await.unwrap();
    first.search_nearby(None, None).await.unwrap();
    let before = first.ranked().await;

    let second = discovery(&server, Arc::new(FileStore::new(dir.path())));
    let outcome = second.restore().await;
    assert_eq!(outcome.origin, CandidateOrigin::Cache);
    assert_eq!(second.ranked().await, before);
}

#[tokio::test]
async fn directory_load_uses_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DIRECTORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&seed_facilities()))
        .mount(&server)
        .await;

    let discovery = discovery(&server, Arc::new(MemoryStore::new()));
    let outcome = discovery.load_directory().await;
    assert_eq!(outcome.origin, CandidateOrigin::Directory);
    assert!(outcome.notice.is_none());
    assert_eq!(discovery.visible().await, seed_facilities());
}

#[tokio::test]
async fn recenter_moves_search_centre() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"lat": "28.6139", "lon": "77.2090", "display_name": "New Delhi"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"elements": []})))
        .mount(&server)
        .await;

    let discovery = discovery(&server, Arc::new(MemoryStore::new()));
    discovery.locate().await.unwrap();
    discovery.recenter("New Delhi").await.unwrap();
    discovery.search_nearby(None, None).await.unwrap();

    let snapshot = discovery.snapshot().await;
    assert_eq!(snapshot.map_center, Some(UserLocation::new(28.6139, 77.209).unwrap()));
    assert_eq!(snapshot.origin, Some(bangalore()));

    let requests = server.received_requests().await.unwrap();
    let data = requests
        .iter()
        .filter(|r| r.url.path() == "/api/interpreter")
        .find_map(|r| r.url.query_pairs().find(|(k, _)| k == "data").map(|(_, v)| v.into_owned()))
        .unwrap();
    assert!(data.contains("around:11000,28.6139,77.209"));
}
