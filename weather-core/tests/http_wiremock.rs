//! HTTP clients against a mock server.

use std::time::Duration;

use weather_core::{
    Coordinates, ForecastIoClient, ForecastIoOptions, ForecastProvider, ForecastRequest,
    IpEchoResolver, IpResolver, WeatherError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_forecast_json() -> serde_json::Value {
    serde_json::json!({
        "latitude": 40.7128,
        "longitude": -74.006,
        "timezone": "America/New_York",
        "offset": -5,
        "currently": {
            "time": 1705334400,
            "summary": "Clear",
            "icon": "clear-day",
            "temperature": 20,
            "apparentTemperature": 19,
            "humidity": 0.5
        },
        "hourly": {
            "summary": "Clear throughout the day.",
            "data": [
                { "time": 1705334400, "summary": "Clear", "temperature": 20,
                  "apparentTemperature": 19, "humidity": 0.5 },
                { "time": 1705338000, "summary": "Clear", "temperature": 21.5,
                  "apparentTemperature": 20.25, "humidity": 0.42 }
            ]
        },
        "daily": {
            "data": [
                { "time": 1705294800, "summary": "Clear", "temperatureMin": 12,
                  "temperatureMax": 22.5, "humidity": 0.4999, "precipProbability": 0.05 }
            ]
        },
        "flags": { "units": "si" }
    })
}

async fn forecast_client(server: &MockServer) -> ForecastIoClient {
    ForecastIoClient::new(ForecastIoOptions {
        base_url: format!("{}/forecast", server.uri()),
        timeout: Duration::from_secs(5),
    })
    .expect("client builds")
}

fn nyc_request() -> ForecastRequest {
    ForecastRequest::new("KEY", Coordinates::new(40.7128, -74.006)).expect("non-empty key")
}

// ============================================================================
// Forecast client
// ============================================================================

#[tokio::test]
async fn forecast_request_uses_key_coordinates_and_si_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast/KEY/40.7128,-74.006"))
        .and(query_param("units", "si"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_json()))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = forecast_client(&server).await.forecast(&nyc_request()).await;
    let forecast = forecast.expect("forecast parses");

    assert_eq!(forecast.timezone, "America/New_York");
    assert_eq!(forecast.currently.summary, "Clear");
    assert_eq!(forecast.hourly.data.len(), 2);
    assert_eq!(forecast.hourly.data[1].temperature.to_string(), "21.5");
    assert_eq!(forecast.hourly.data[0].temperature.to_string(), "20");
    assert_eq!(forecast.daily.data[0].precip_probability, 0.05);
}

#[tokio::test]
async fn forecast_server_error_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("daily usage limit exceeded"))
        .mount(&server)
        .await;

    let err = forecast_client(&server).await.forecast(&nyc_request()).await.unwrap_err();

    assert!(matches!(err, WeatherError::Network(_)), "got {err:?}");
    let msg = err.to_string();
    assert!(msg.contains("403"));
    assert!(msg.contains("daily usage limit exceeded"));
}

#[tokio::test]
async fn forecast_non_json_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = forecast_client(&server).await.forecast(&nyc_request()).await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn forecast_wrong_shape_is_parse_error() {
    let server = MockServer::start().await;

    let mut body = sample_forecast_json();
    body["currently"]["temperature"] = serde_json::json!("warm");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = forecast_client(&server).await.forecast(&nyc_request()).await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn forecast_unreachable_host_is_network_error() {
    let client = ForecastIoClient::new(ForecastIoOptions {
        base_url: "http://127.0.0.1:1/forecast".into(),
        timeout: Duration::from_secs(2),
    })
    .unwrap();

    let err = client.forecast(&nyc_request()).await.unwrap_err();
    assert!(matches!(err, WeatherError::Network(_)), "got {err:?}");
    assert!(!err.to_string().contains("KEY"), "API key leaked: {err}");
}

// ============================================================================
// IP echo resolver
// ============================================================================

#[tokio::test]
async fn ip_echo_returns_trimmed_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("203.0.113.7\n"))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = IpEchoResolver::new(format!("{}/plain", server.uri()), Duration::from_secs(5))
        .unwrap();

    let ip = resolver.public_ip().await.unwrap();
    assert_eq!(ip.to_string(), "203.0.113.7");
}

#[tokio::test]
async fn ip_echo_garbage_is_geolocation_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not an ip"))
        .mount(&server)
        .await;

    let resolver = IpEchoResolver::new(server.uri(), Duration::from_secs(5)).unwrap();

    let err = resolver.public_ip().await.unwrap_err();
    assert!(matches!(err, WeatherError::Geolocation(_)), "got {err:?}");
}

#[tokio::test]
async fn ip_echo_server_error_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let resolver = IpEchoResolver::new(server.uri(), Duration::from_secs(5)).unwrap();

    let err = resolver.public_ip().await.unwrap_err();
    assert!(matches!(err, WeatherError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn ip_echo_unreachable_is_network_error() {
    let resolver = IpEchoResolver::new("http://127.0.0.1:1/plain", Duration::from_secs(2)).unwrap();

    let err = resolver.public_ip().await.unwrap_err();
    assert!(matches!(err, WeatherError::Network(_)), "got {err:?}");
}
