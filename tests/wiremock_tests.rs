//! End-to-end tests for the forecast client against a mock HTTP server.
//!
//! The client is blocking, so every fetch runs on `spawn_blocking` while the
//! mock server keeps serving on the test runtime.

use std::time::Duration;

use windy_forecast::{Client, ClientOptions, Config, Error, Report, fetch_forecast};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

const FORECAST_PATH: &str = "/api/point-forecast/v2";
const KEY: &str = "test-key";

fn sample_forecast_response() -> serde_json::Value {
    serde_json::json!({
        "ts": [1705320000000i64, 1705330800000i64, 1705341600000i64, 1705352400000i64],
        "units": {
            "temp-surface": "K",
            "dewpoint-surface": "K",
            "past3hprecip-surface": "m",
            "wind_u-surface": "m*s-1",
            "wind_v-surface": "m*s-1",
            "ptype-surface": null,
            "pressure-surface": "Pa"
        },
        "warning": "The trial API version is for development purposes only.",
        "temp-surface": [268.4, 267.9, 270.1, 272.6],
        "temp-800h": [259.0, 258.5, 258.1, 259.3],
        "dewpoint-surface": [265.0, 264.8, 266.2, 267.0],
        "past3hprecip-surface": [0.0, 0.0004, 0.0011, 0.0],
        "wind_u-surface": [1.2, 2.5, -0.4, -3.1],
        "wind_v-surface": [-4.0, -3.2, 0.8, 1.9],
        "gust-surface": [7.5, 8.1, 4.0, 6.6],
        "cape-surface": [0.0, 0.0, 15.0, 2.0],
        "ptype-surface": [0, 5, 5, 0],
        "lclouds-surface": [80.0, 95.0, 100.0, 40.0],
        "pressure-surface": [101200.0, 101050.0, 100980.0, 101100.0]
    })
}

fn expected_request_body(lat: f64, lon: f64) -> serde_json::Value {
    serde_json::json!({
        "key": KEY,
        "lat": lat,
        "levels": ["surface", "1000h", "800h", "400h", "200h"],
        "lon": lon,
        "model": "gfs",
        "parameters": [
            "temp", "dewpoint", "precip", "convPrecip", "snowPrecip", "wind", "windGust",
            "cape", "ptype", "lclouds", "mclouds", "hclouds", "rh", "gh", "pressure"
        ]
    })
}

/// Run a fetch against `mock_server` off the async runtime.
async fn fetch(
    mock_server: &MockServer,
    lat: f64,
    lon: f64,
    key: &str,
    deadline: Option<Duration>,
) -> Result<Report, Error> {
    let endpoint = format!("{}{FORECAST_PATH}", mock_server.uri());
    let key = key.to_string();
    tokio::task::spawn_blocking(move || {
        let client = Client::new(ClientOptions {
            endpoint,
            ..ClientOptions::default()
        })?;
        client.fetch_with_deadline(lat, lon, &key, deadline)
    })
    .await
    .expect("blocking fetch panicked")
}

async fn setup_forecast_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(FORECAST_PATH))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn fetch_decodes_forecast() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_forecast_response()),
    )
    .await;

    let result = fetch(&mock_server, 53.19, -112.25, KEY, None).await;
    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let report = result.unwrap();
    assert_eq!(report.len(), 4);
    assert_eq!(report.temp_surface, vec![268.4, 267.9, 270.1, 272.6]);
    assert_eq!(report.temp_800h, vec![259.0, 258.5, 258.1, 259.3]);
    assert_eq!(report.ptype_surface, vec![0, 5, 5, 0]);
    assert_eq!(report.series("gust-surface"), Some(&[7.5, 8.1, 4.0, 6.6][..]));
    assert!(report.rh_200h.is_empty());
    assert!(report.warning.is_some());
}

#[tokio::test]
async fn fetch_sends_canonical_post() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FORECAST_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(expected_request_body(53.19, -112.25)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ts": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = fetch(&mock_server, 53.19, -112.25, KEY, None).await;
    assert!(result.is_ok(), "Expected success, got: {result:?}");
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn missing_series_is_not_an_error() {
    let mock_server = MockServer::start().await;
    let mut body = sample_forecast_response();
    body.as_object_mut().unwrap().remove("cape-surface");
    setup_forecast_mock(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let report = fetch(&mock_server, 53.19, -112.25, KEY, None).await.unwrap();
    assert!(report.cape_surface.is_empty());
    assert_eq!(report.temp_surface.len(), 4);
}

#[tokio::test]
async fn fetch_forecast_uses_config() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FORECAST_PATH))
        .and(body_json(expected_request_body(10.0, 20.0)))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config {
        endpoint: format!("{}{FORECAST_PATH}", mock_server.uri()),
        api_key: KEY.to_string(),
    };
    let report = tokio::task::spawn_blocking(move || fetch_forecast(10.0, 20.0, &config))
        .await
        .expect("blocking fetch panicked")
        .unwrap();
    assert_eq!(report.len(), 4);
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn not_found_is_unexpected_status() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(404).set_body_string("Not Found"),
    )
    .await;

    let result = fetch(&mock_server, 53.19, -112.25, KEY, None).await;
    match result {
        Err(Error::UnexpectedStatus { code, status_text }) => {
            assert_eq!(code, 404);
            assert_eq!(status_text, "404 Not Found");
        }
        other => panic!("Expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_key_reports_status_line() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(400).set_body_json(serde_json::json!({ "message": "Invalid API key" })),
    )
    .await;

    let err = fetch(&mock_server, 53.19, -112.25, "wrong-key", None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "400 Bad Request");
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = fetch(&mock_server, 53.19, -112.25, KEY, None).await;
    assert!(
        matches!(result, Err(Error::UnexpectedStatus { code: 503, .. })),
        "Expected UnexpectedStatus, got: {result:?}"
    );
}

#[tokio::test]
async fn invalid_json_is_malformed_payload() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let result = fetch(&mock_server, 53.19, -112.25, KEY, None).await;
    assert!(
        matches!(result, Err(Error::MalformedPayload(_))),
        "Expected MalformedPayload, got: {result:?}"
    );
}

#[tokio::test]
async fn misaligned_series_is_rejected() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ts": [1, 2, 3],
            "rh-1000h": [80.0, 81.0]
        })),
    )
    .await;

    let result = fetch(&mock_server, 53.19, -112.25, KEY, None).await;
    assert!(
        matches!(result, Err(Error::MisalignedSeries { field: "rh-1000h", .. })),
        "Expected MisalignedSeries, got: {result:?}"
    );
}

#[tokio::test]
async fn invalid_input_never_reaches_the_server() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cases = [
        (95.0, -112.25, KEY),
        (53.19, 200.0, KEY),
        (53.19, -112.25, ""),
        (f64::NAN, 0.0, KEY),
    ];
    for (lat, lon, key) in cases {
        let result = fetch(&mock_server, lat, lon, key, None).await;
        assert!(
            matches!(
                result,
                Err(Error::InvalidLatitude(_) | Error::InvalidLongitude(_) | Error::MissingApiKey)
            ),
            "Expected validation error, got: {result:?}"
        );
    }
}

#[tokio::test]
async fn deadline_is_passed_to_transport() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(sample_forecast_response())
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let result = fetch(
        &mock_server,
        53.19,
        -112.25,
        KEY,
        Some(Duration::from_millis(200)),
    )
    .await;
    match result {
        Err(Error::TransportFailure(e)) => assert!(e.is_timeout(), "Expected timeout, got: {e}"),
        other => panic!("Expected TransportFailure, got: {other:?}"),
    }
}
