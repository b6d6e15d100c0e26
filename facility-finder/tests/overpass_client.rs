//! Integration tests for `OverpassClient` using wiremock HTTP mocks.

use facility_finder::domain::UserLocation;
use facility_finder::overpass::{DEFAULT_CATEGORIES, OverpassClient, OverpassConfig, OverpassError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> OverpassClient {
    OverpassClient::new(
        OverpassConfig::new()
            .with_base_url(format!("{}/api/interpreter", server.uri()))
            .with_timeout(5),
    )
    .expect("client construction should not fail")
}

fn categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

fn bangalore() -> UserLocation {
    UserLocation::new(12.9716, 77.5946).unwrap()
}

#[tokio::test]
async fn search_parses_points_and_areas() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "version": 0.6,
        "elements": [
            {
                "type": "node",
                "id": 101,
                "lat": 12.975,
                "lon": 77.60,
                "tags": {"amenity": "pharmacy", "name": "Apollo Pharmacy", "phone": "+91 80 1111"}
            },
            {
                "type": "way",
                "id": 202,
                "center": {"lat": 12.95, "lon": 77.61},
                "tags": {"amenity": "hospital", "operator": "BBMP", "healthcare": "hospital"}
            },
            {
                "type": "relation",
                "id": 303,
                "tags": {"amenity": "clinic"}
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let facilities = test_client(&server)
        .search_nearby(&bangalore(), 11_000, &categories())
        .await
        .expect("should parse response");

    assert_eq!(facilities.len(), 2);

    assert_eq!(facilities[0].id.as_str(), "101");
    assert_eq!(facilities[0].kind, "Pharmacy");
    assert_eq!(facilities[0].phone.as_deref(), Some("+91 80 1111"));

    assert_eq!(facilities[1].name, "BBMP");
    assert_eq!(facilities[1].lat, 12.95);
    assert_eq!(facilities[1].lng, 77.61);
    assert_eq!(facilities[1].services, ["hospital"]);
}

#[tokio::test]
async fn query_is_sent_in_data_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"elements": []})))
        .mount(&server)
        .await;

    let facilities = test_client(&server)
        .search_nearby(&bangalore(), 5_000, &categories())
        .await
        .unwrap();
    assert!(facilities.is_empty());

    let requests = server.received_requests().await.unwrap();
    let data = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "data")
        .map(|(_, v)| v.into_owned())
        .expect("data parameter present");

    assert!(data.starts_with("[out:json];"));
    assert!(data.contains("around:5000,12.9716,77.5946"));
    assert!(data.contains("hospital|clinic|pharmacy|doctors|health_care|dentist"));
    assert!(data.trim_end().ends_with("out center;"));
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .search_nearby(&bangalore(), 11_000, &categories())
        .await;
    assert!(matches!(result, Err(OverpassError::RateLimited)));
}

#[tokio::test]
async fn server_error_carries_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(504).set_body_string("Gateway Timeout"))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .search_nearby(&bangalore(), 11_000, &categories())
        .await;
    match result {
        Err(OverpassError::ApiError { status, message }) => {
            assert_eq!(status, 504);
            assert_eq!(message, "Gateway Timeout");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .search_nearby(&bangalore(), 11_000, &categories())
        .await;
    match result {
        Err(OverpassError::Json { body, .. }) => {
            assert_eq!(body.as_deref(), Some("<html>busy</html>"));
        }
        other => panic!("expected Json error, got {other:?}"),
    }
}

#[tokio::test]
async fn runtime_error_remark_is_query_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "version": 0.6,
            "elements": [],
            "remark": "runtime error: Query timed out in \"query\" at line 1 after 25 seconds."
        })))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .search_nearby(&bangalore(), 11_000, &categories())
        .await;
    match result {
        Err(OverpassError::QueryFailed(remark)) => assert!(remark.contains("Query timed out")),
        other => panic!("expected QueryFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn node_and_way_sharing_an_id_both_survive() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "elements": [
                {"type": "node", "id": 5, "lat": 12.97, "lon": 77.59, "tags": {"name": "Corner Pharmacy"}},
                {"type": "way", "id": 5, "center": {"lat": 12.96, "lon": 77.60}, "tags": {"name": "City Hospital"}}
            ]
        })))
        .mount(&server)
        .await;

    let facilities = test_client(&server)
        .search_nearby(&bangalore(), 11_000, &categories())
        .await
        .unwrap();
    let names: Vec<&str> = facilities.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Corner Pharmacy", "City Hospital"]);
}
