// Route retrieval against a mocked directions service.

use serde_json::json;
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use geo_cell::models::GeoPoint;
use geo_cell::services::route::RouteService;
use shared_utils::test_utils::TestConfig;

fn service_against(mock_server: &MockServer) -> RouteService {
    let config = TestConfig::with_mock_server(&mock_server.uri()).to_app_config();
    RouteService::new(&config)
}

fn start() -> GeoPoint {
    GeoPoint::new(36.75, 3.05)
}

fn end() -> GeoPoint {
    GeoPoint::new(36.76, 3.06)
}

#[tokio::test]
async fn decodes_and_reorders_route_geometry() {
    let mock_server = MockServer::start().await;

    // The service speaks GeoJSON axis order: (lng, lat).
    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.*"))
        .and(query_param("geometries", "geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "routes": [{
                "geometry": {
                    "coordinates": [
                        [3.05, 36.75],
                        [3.055, 36.755],
                        [3.06, 36.76]
                    ]
                }
            }]
        })))
        .mount(&mock_server)
        .await;

    let route = service_against(&mock_server)
        .driving_route(start(), end())
        .await;

    assert_eq!(route.len(), 3);
    assert_eq!(route[0], GeoPoint::new(36.75, 3.05));
    assert_eq!(route[2], GeoPoint::new(36.76, 3.06));
}

#[tokio::test]
async fn only_the_first_route_is_used() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "routes": [
                { "geometry": { "coordinates": [[3.05, 36.75], [3.06, 36.76]] } },
                { "geometry": { "coordinates": [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]] } }
            ]
        })))
        .mount(&mock_server)
        .await;

    let route = service_against(&mock_server)
        .driving_route(start(), end())
        .await;

    assert_eq!(route.len(), 2);
    assert_eq!(route[0], GeoPoint::new(36.75, 3.05));
}

#[tokio::test]
async fn server_error_falls_back_to_straight_line() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.*"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let route = service_against(&mock_server)
        .driving_route(start(), end())
        .await;

    assert_eq!(route, vec![start(), end()]);
}

#[tokio::test]
async fn malformed_body_falls_back_to_straight_line() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let route = service_against(&mock_server)
        .driving_route(start(), end())
        .await;

    assert_eq!(route, vec![start(), end()]);
}

#[tokio::test]
async fn empty_route_list_falls_back_to_straight_line() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "routes": [] })))
        .mount(&mock_server)
        .await;

    let route = service_against(&mock_server)
        .driving_route(start(), end())
        .await;

    assert_eq!(route, vec![start(), end()]);
}

#[tokio::test]
async fn unreachable_service_falls_back_to_straight_line() {
    // Bind-then-drop leaves a port nothing listens on.
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let config = TestConfig::with_mock_server(&uri).to_app_config();
    let route = RouteService::new(&config)
        .driving_route(start(), end())
        .await;

    assert_eq!(route, vec![start(), end()]);
}
