//! Lookup adapter behaviour against a mock Open-Meteo server.

use weather_compare_core::{
    FavoritesStore, LookupError, MemoryStore, OpenMeteoLookup, Reading, SessionController, Slot,
    WeatherLookup,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn geocoding_response(name: &str, latitude: f64, longitude: f64) -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "id": 2988507,
            "name": name,
            "latitude": latitude,
            "longitude": longitude,
            "elevation": 42.0,
            "country_code": "FR",
            "timezone": "Europe/Paris",
            "country": "France"
        }],
        "generationtime_ms": 0.7
    })
}

fn forecast_response(temperature: f64, windspeed: f64) -> serde_json::Value {
    serde_json::json!({
        "latitude": 48.86,
        "longitude": 2.3399997,
        "generationtime_ms": 0.03,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "timezone_abbreviation": "GMT",
        "elevation": 43.0,
        "current_weather_units": {
            "time": "iso8601",
            "interval": "seconds",
            "temperature": "°C",
            "windspeed": "km/h",
            "winddirection": "°",
            "is_day": "",
            "weathercode": "wmo code"
        },
        "current_weather": {
            "time": "2024-01-15T12:00",
            "interval": 900,
            "temperature": temperature,
            "windspeed": windspeed,
            "winddirection": 225,
            "is_day": 1,
            "weathercode": 3
        }
    })
}

fn lookup_for(server: &MockServer) -> OpenMeteoLookup {
    OpenMeteoLookup::new(server.uri(), server.uri())
}

async fn mount_geocoding(server: &MockServer, city: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", city))
        .and(query_param("count", "1"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.85341"))
        .and(query_param("longitude", "2.3488"))
        .and(query_param("current_weather", "true"))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Success
// ============================================================================

#[tokio::test]
async fn resolves_to_geocoder_display_name() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        "paris",
        ResponseTemplate::new(200).set_body_json(geocoding_response("Paris", 48.85341, 2.3488)),
    )
    .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_response(7.4, 12.5)))
        .await;

    let record = lookup_for(&server).resolve_weather("paris").await;

    assert_eq!(record.name, "Paris");
    assert_eq!(record.temperature, Reading::Value(7.4));
    assert_eq!(record.humidity, Reading::Unavailable);
    assert_eq!(record.condition, "Wind 12.5 km/h");
    let observed = record.observed_at.expect("observation time should parse");
    assert_eq!(observed.format("%Y-%m-%dT%H:%M").to_string(), "2024-01-15T12:00");
}

#[tokio::test]
async fn whole_wind_speed_has_no_decimal() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        "Paris",
        ResponseTemplate::new(200).set_body_json(geocoding_response("Paris", 48.85341, 2.3488)),
    )
    .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_response(0.0, 10.0)))
        .await;

    let record = lookup_for(&server).resolve_weather("Paris").await;

    assert_eq!(record.condition, "Wind 10 km/h");
    assert_eq!(record.temperature, Reading::Value(0.0));
}

#[tokio::test]
async fn city_name_with_spaces_is_query_encoded() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        "New York",
        ResponseTemplate::new(200).set_body_json(geocoding_response("New York", 48.85341, 2.3488)),
    )
    .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_response(3.0, 8.0)))
        .await;

    let record = lookup_for(&server).resolve_weather("New York").await;

    assert_eq!(record.name, "New York");
    assert!(!record.is_placeholder());
}

// ============================================================================
// Not found
// ============================================================================

#[tokio::test]
async fn empty_results_is_city_not_found() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        "Atlantis",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
    )
    .await;
    Mock::given(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let record = lookup_for(&server).resolve_weather("Atlantis").await;

    assert_eq!(record.name, "Atlantis");
    assert_eq!(record.condition, "City not found");
    assert_eq!(record.temperature, Reading::Unavailable);
    assert_eq!(record.humidity, Reading::Unavailable);
}

#[tokio::test]
async fn missing_results_is_city_not_found() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        "Atlantis",
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "generationtime_ms": 0.4 })),
    )
    .await;

    let record = lookup_for(&server).resolve_weather("Atlantis").await;

    assert_eq!(record.condition, "City not found");
    assert!(record.observed_at.is_none());
}

// ============================================================================
// Transport / parse failures
// ============================================================================

#[tokio::test]
async fn geocoding_server_error_is_fetch_error() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Paris", ResponseTemplate::new(500).set_body_string("boom")).await;

    let lookup = lookup_for(&server);
    let err = lookup.try_resolve("Paris").await.unwrap_err();
    assert!(matches!(err, LookupError::Status { endpoint: "geocoding", .. }), "got: {err:?}");

    let record = lookup.resolve_weather("Paris").await;
    assert_eq!(record.name, "Paris");
    assert_eq!(record.condition, "Error fetching weather");
    assert_eq!(record.temperature, Reading::Unavailable);
    assert_eq!(record.humidity, Reading::Unavailable);
}

#[tokio::test]
async fn geocoding_client_error_with_json_body_is_fetch_error() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        "Paris",
        ResponseTemplate::new(400)
            .set_body_json(serde_json::json!({ "error": true, "reason": "Parameter count must be positive" })),
    )
    .await;

    let record = lookup_for(&server).resolve_weather("Paris").await;

    assert_eq!(record.condition, "Error fetching weather");
    assert_ne!(record.condition, "City not found");
}

#[tokio::test]
async fn invalid_geocoding_json_is_fetch_error() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Paris", ResponseTemplate::new(200).set_body_string("not json")).await;

    let lookup = lookup_for(&server);
    assert!(matches!(lookup.try_resolve("Paris").await, Err(LookupError::Parse { .. })));
    assert_eq!(lookup.resolve_weather("Paris").await.condition, "Error fetching weather");
}

#[tokio::test]
async fn forecast_without_current_weather_is_fetch_error() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        "Paris",
        ResponseTemplate::new(200).set_body_json(geocoding_response("Paris", 48.85341, 2.3488)),
    )
    .await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "latitude": 48.86 })),
    )
    .await;

    let lookup = lookup_for(&server);
    let err = lookup.try_resolve("Paris").await.unwrap_err();
    assert!(matches!(err, LookupError::Parse { endpoint: "forecast", .. }), "got: {err:?}");

    let record = lookup.resolve_weather("Paris").await;
    assert_eq!(record.name, "Paris");
    assert_eq!(record.condition, "Error fetching weather");
}

#[tokio::test]
async fn forecast_rate_limit_is_fetch_error() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        "Paris",
        ResponseTemplate::new(200).set_body_json(geocoding_response("Paris", 48.85341, 2.3488)),
    )
    .await;
    mount_forecast(&server, ResponseTemplate::new(429).set_body_string("slow down")).await;

    let record = lookup_for(&server).resolve_weather("Paris").await;

    assert_eq!(record.condition, "Error fetching weather");
}

#[tokio::test]
async fn unreachable_server_is_fetch_error() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let lookup = OpenMeteoLookup::new(uri.clone(), uri);
    assert!(matches!(lookup.try_resolve("Paris").await, Err(LookupError::Request { .. })));
    assert_eq!(lookup.resolve_weather("Paris").await.condition, "Error fetching weather");
}

// ============================================================================
// Controller over the real adapter
// ============================================================================

#[tokio::test]
async fn session_compares_live_lookups() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        "Paris",
        ResponseTemplate::new(200).set_body_json(geocoding_response("Paris", 48.85341, 2.3488)),
    )
    .await;
    mount_geocoding(
        &server,
        "Atlantis",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
    )
    .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_response(7.4, 12.5)))
        .await;

    let store = MemoryStore::new();
    let mut session = SessionController::new(lookup_for(&server), store.clone());

    session.compare("Paris").await;
    session.compare("Atlantis").await;

    let view = session.view();
    assert_eq!(view.left().map(|r| r.name.as_str()), Some("Paris"));
    assert_eq!(view.right().map(|r| r.condition.as_str()), Some("City not found"));
    assert_eq!(session.next_slot(), Slot::Left);

    session.save_favorite("Paris");
    assert_eq!(store.load(), vec!["Paris".to_string()]);
}
