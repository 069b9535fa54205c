//! Integration tests for the HTTP API.

use std::io::Write;
use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use geodist::{Gazetteer, Geocoder, GeocoderConfig, Resolvers};
use geodist_service::{router, AppState};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WORLD_CITIES: &str = r#""city","city_ascii","lat","lng","country","iso2","iso3","admin_name","capital","population","id"
"London","London","51.5074","-0.1278","United Kingdom","GB","GBR","London, City of","primary","11262000","1826645935"
"Paris","Paris","48.8566","2.3522","France","FR","FRA","Île-de-France","primary","11060000","1250015082"
"São Paulo","Sao Paulo","-23.5504","-46.6339","Brazil","BR","BRA","São Paulo","admin","23086000","1076532519"
"#;

/// Write the test gazetteer to disk, the way the service loads it.
fn create_gazetteer_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(WORLD_CITIES.as_bytes()).unwrap();
    file
}

/// Create a test server whose geocoder points at `geocoder_url`.
fn create_test_server_with_geocoder(geocoder_url: &str) -> TestServer {
    let file = create_gazetteer_file();
    let gazetteer = Gazetteer::from_path(file.path()).unwrap();
    let geocoder = Geocoder::new(GeocoderConfig::with_base_url(geocoder_url).with_timeout(2)).unwrap();

    let state = Arc::new(AppState {
        resolvers: Resolvers::new(Arc::new(gazetteer), Arc::new(geocoder)),
    });

    TestServer::new(router(state)).unwrap()
}

/// Create a test server that must not touch the network.
fn create_test_server() -> TestServer {
    create_test_server_with_geocoder("http://127.0.0.1:9/search")
}

async fn mount_place(server: &MockServer, name: &str, lat: &str, lon: &str) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", name))
        .and(query_param("format", "json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"lat": lat, "lon": lon}])),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_distance_csv_get() {
    let server = create_test_server();

    let response = server
        .get("/distance?city1=London&city2=Paris&method=CSV")
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    let distance = json["distance"].as_u64().unwrap();
    assert!((338..=348).contains(&distance), "London-Paris was {} km", distance);
    assert_eq!(json.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_distance_csv_post() {
    let server = create_test_server();

    let response = server
        .post("/distance")
        .json(&json!({"city1": "Paris", "city2": "London", "method": "CSV"}))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    let distance = json["distance"].as_u64().unwrap();
    assert!((338..=348).contains(&distance));
}

#[tokio::test]
async fn test_distance_is_symmetric() {
    let server = create_test_server();

    let forward: Value = server
        .get("/distance?city1=London&city2=Sao%20Paulo&method=CSV")
        .await
        .json();
    let backward: Value = server
        .get("/distance?city1=Sao%20Paulo&city2=London&method=CSV")
        .await
        .json();

    assert_eq!(forward["distance"], backward["distance"]);
}

#[tokio::test]
async fn test_distance_same_place_is_zero() {
    let server = create_test_server();

    let response = server
        .get("/distance?city1=Paris&city2=Paris&method=CSV")
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["distance"], 0);
}

#[tokio::test]
async fn test_distance_csv_unknown_place() {
    let server = create_test_server();

    let response = server
        .get("/distance?city1=London&city2=Atlantis&method=CSV")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("Atlantis"));
    assert!(json.get("distance").is_none());
}

#[tokio::test]
async fn test_distance_csv_is_case_sensitive() {
    let server = create_test_server();

    let response = server
        .get("/distance?city1=london&city2=Paris&method=CSV")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_distance_mock() {
    let server = create_test_server();

    for _ in 0..20 {
        let response = server
            .get("/distance?city1=Nowhere&city2=Elsewhere&method=MOCK")
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert!(json["distance"].as_u64().unwrap() < 100);
    }
}

#[tokio::test]
async fn test_distance_unknown_method() {
    let server = create_test_server();

    let response = server
        .get("/distance?city1=London&city2=Paris&method=GPS")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("GPS"));

    // Mode identifiers are exact.
    let response = server
        .get("/distance?city1=London&city2=Paris&method=csv")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("csv"));
}

#[tokio::test]
async fn test_distance_missing_params() {
    let server = create_test_server();

    let response = server.get("/distance?city1=London&city2=Paris").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("method"));

    let response = server.get("/distance?city1=London&method=CSV").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("city2"));

    let response = server.get("/distance").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_distance_post_query_string() {
    let server = create_test_server();

    let response = server
        .post("/distance?city1=London&city2=Paris&method=CSV")
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    let distance = json["distance"].as_u64().unwrap();
    assert!((338..=348).contains(&distance));
}

#[tokio::test]
async fn test_distance_post_without_query() {
    let server = create_test_server();

    let response = server.post("/distance?city1=London").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("city2"));

    let response = server
        .post("/distance")
        .json(&json!({"city1": "London", "city2": "Paris"}))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("method"));
}

#[tokio::test]
async fn test_distance_api() {
    let geocoder = MockServer::start().await;
    mount_place(&geocoder, "London", "51.5073219", "-0.1276474").await;
    mount_place(&geocoder, "Paris", "48.8588897", "2.3200410").await;

    let server = create_test_server_with_geocoder(&format!("{}/search", geocoder.uri()));

    let response = server
        .post("/distance")
        .json(&json!({"city1": "London", "city2": "Paris", "method": "API"}))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    let distance = json["distance"].as_u64().unwrap();
    assert!((338..=348).contains(&distance));
}

#[tokio::test]
async fn test_distance_api_encodes_place_names() {
    let geocoder = MockServer::start().await;
    mount_place(&geocoder, "Lima, Peru", "-12.0621065", "-77.0365256").await;
    mount_place(&geocoder, "Rio de Janeiro & co", "-22.9110137", "-43.2093727").await;

    let server = create_test_server_with_geocoder(&format!("{}/search", geocoder.uri()));

    let response = server
        .post("/distance")
        .json(&json!({"city1": "Lima, Peru", "city2": "Rio de Janeiro & co", "method": "API"}))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_distance_api_no_candidates() {
    let geocoder = MockServer::start().await;
    mount_place(&geocoder, "London", "51.5073219", "-0.1276474").await;
    Mock::given(method("GET"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&geocoder)
        .await;

    let server = create_test_server_with_geocoder(&format!("{}/search", geocoder.uri()));

    let response = server
        .get("/distance?city1=London&city2=Atlantis&method=API")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("no candidates"));
}

#[tokio::test]
async fn test_distance_api_upstream_failure() {
    let geocoder = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&geocoder)
        .await;

    let server = create_test_server_with_geocoder(&format!("{}/search", geocoder.uri()));

    let response = server
        .get("/distance?city1=London&city2=Paris&method=API")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("502"));
}

#[tokio::test]
async fn test_distance_api_malformed_body() {
    let geocoder = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"an array\"}"))
        .mount(&geocoder)
        .await;

    let server = create_test_server_with_geocoder(&format!("{}/search", geocoder.uri()));

    let response = server
        .get("/distance?city1=London&city2=Paris&method=API")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_place_endpoint() {
    let server = create_test_server();

    let response = server.get("/places/Paris").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["name"], "Paris");
    assert_eq!(json["country"], "France");
    assert_eq!(json["iso2"], "FR");
    assert_eq!(json["lat"], 48.8566);
    assert_eq!(json["lon"], 2.3522);
    assert_eq!(json["capital"], "primary");
    assert_eq!(json["population"], 11060000);
}

#[tokio::test]
async fn test_place_endpoint_ascii_alias() {
    let server = create_test_server();

    let by_ascii: Value = server.get("/places/Sao%20Paulo").await.json();
    let by_name: Value = server.get("/places/S%C3%A3o%20Paulo").await.json();

    assert_eq!(by_ascii["name"], "São Paulo");
    assert_eq!(by_ascii, by_name);
}

#[tokio::test]
async fn test_place_endpoint_not_found() {
    let server = create_test_server();

    let response = server.get("/places/Atlantis").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["places"], 3);
    assert!(json["version"].as_str().is_some());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = create_test_server();

    let response = server
        .get("/health")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("http://localhost:5173"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_openapi_document() {
    let server = create_test_server();

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert!(json["paths"]["/distance"]["get"].is_object());
    assert!(json["paths"]["/distance"]["post"].is_object());
    assert!(json["paths"]["/places/{name}"].is_object());
    assert!(json["paths"]["/health"].is_object());
}

#[tokio::test]
async fn test_swagger_ui() {
    let server = create_test_server();

    let response = server.get("/docs/").await;

    response.assert_status_ok();
    assert!(response.text().contains("swagger"));
}
