//! Integration tests for GeocodingClient using wiremock.
//!
//! City search is fail-soft: every failure mode must come back as an empty list.

use std::time::Duration;

use skylook_weather::GeocodingClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GeocodingClient {
    GeocodingClient::new(&server.uri(), Duration::from_secs(5), "skylook-tests").unwrap()
}

fn city(name: &str, country: &str, lat: f64, lon: f64) -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "name": name,
        "country": country,
        "latitude": lat,
        "longitude": lon,
        "admin1": "ignored",
        "timezone": "Europe/London"
    })
}

#[tokio::test]
async fn test_search_success_keeps_provider_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Lond"))
        .and(query_param("count", "5"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                city("London", "United Kingdom", 51.50853, -0.12574),
                city("London", "Canada", 42.98339, -81.23304),
                city("Londonderry", "United Kingdom", 54.9981, -7.30934),
            ],
            "generationtime_ms": 0.7
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let results = client_for(&mock_server).search("Lond").await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].name, "London");
    assert_eq!(results[0].country, "United Kingdom");
    assert_eq!(results[1].country, "Canada");
    assert_eq!(results[2].name, "Londonderry");
    assert!((results[0].latitude - 51.50853).abs() < 1e-9);
    assert!((results[0].longitude + 0.12574).abs() < 1e-9);
}

#[tokio::test]
async fn test_search_no_matches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "generationtime_ms": 0.2
        })))
        .mount(&mock_server)
        .await;

    let results = client_for(&mock_server).search("Qxz").await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_server_error_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let results = client_for(&mock_server).search("Paris").await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_malformed_body_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let results = client_for(&mock_server).search("Paris").await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_connection_refused_is_empty() {
    // Nothing listens on port 1
    let client =
        GeocodingClient::new("http://127.0.0.1:1", Duration::from_secs(5), "skylook-tests")
            .unwrap();

    let results = client.search("Paris").await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_short_query_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.search("P").await.is_empty());
    assert!(client.search("").await.is_empty());
}

#[tokio::test]
async fn test_query_is_url_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo & co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [city("São Paulo", "Brazil", -23.5475, -46.63611)]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let results = client_for(&mock_server).search("São Paulo & co").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "São Paulo");
}

#[tokio::test]
async fn test_custom_count_and_language() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("count", "3"))
        .and(query_param("language", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [city("Berlin", "Deutschland", 52.52437, 13.41053)]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).with_count(3).with_language("de");
    let results = client.search("Berl").await;
    assert_eq!(results[0].country, "Deutschland");
}
