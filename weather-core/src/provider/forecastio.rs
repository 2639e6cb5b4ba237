use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, instrument};

use crate::{
    error::{Result, WeatherError, truncate_body},
    model::{Forecast, ForecastRequest},
};

use super::ForecastProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.forecast.io/forecast";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ForecastIoOptions {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ForecastIoOptions {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

/// Client for the forecast.io (Dark Sky format) API, always in SI units.
#[derive(Debug, Clone)]
pub struct ForecastIoClient {
    base_url: Url,
    http: Client,
}

impl ForecastIoClient {
    pub fn new(options: ForecastIoOptions) -> Result<Self> {
        let http = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| WeatherError::Network(format!("failed to build HTTP client: {e}")))?;

        let base_url = Url::parse(&options.base_url).map_err(|e| {
            WeatherError::Network(format!("invalid forecast base URL '{}': {e}", options.base_url))
        })?;

        Ok(Self { base_url, http })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ForecastIoOptions::default())
    }

    /// `<base>/<key>/<lat>,<lon>`; the `units` query is added by the caller.
    /// The key goes in as one percent-encoded segment.
    fn forecast_url(&self, request: &ForecastRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                WeatherError::Network(format!("forecast base URL {} cannot hold a path", self.base_url))
            })?
            .pop_if_empty()
            .push(request.api_key())
            .push(&request.coordinates.to_string());

        Ok(url)
    }
}

#[async_trait]
impl ForecastProvider for ForecastIoClient {
    #[instrument(skip(self, request), fields(coords = %request.coordinates))]
    async fn forecast(&self, request: &ForecastRequest) -> Result<Forecast> {
        let url = self.forecast_url(request)?;
        debug!(base = %self.base_url, "requesting forecast");

        let res = self
            .http
            .get(url)
            .query(&[("units", "si")])
            .send()
            .await
            .map_err(|e| {
                WeatherError::Network(format!(
                    "failed to reach forecast.io: {}",
                    e.without_url()
                ))
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Network(format!("failed to read forecast body: {e}")))?;

        debug!(%status, bytes = body.len(), "forecast response");

        if !status.is_success() {
            return Err(WeatherError::Network(format!(
                "forecast.io request failed with status {status}: {}",
                truncate_body(&body)
            )));
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;

    #[test]
    fn url_embeds_key_and_coordinates() {
        let client = ForecastIoClient::new(ForecastIoOptions {
            base_url: "https://example.test/forecast/".into(),
            ..Default::default()
        })
        .unwrap();

        let req = ForecastRequest::new("SECRET", Coordinates::new(38.72, -9.14)).unwrap();
        assert_eq!(
            client.forecast_url(&req).unwrap().as_str(),
            "https://example.test/forecast/SECRET/38.72,-9.14"
        );
    }

    #[test]
    fn url_encodes_key_as_single_segment() {
        let client = ForecastIoClient::new(ForecastIoOptions {
            base_url: "https://example.test/forecast".into(),
            ..Default::default()
        })
        .unwrap();

        let req = ForecastRequest::new("ab/cd ef", Coordinates::new(1.5, 2.0)).unwrap();
        let url = client.forecast_url(&req).unwrap();

        assert_eq!(url.path(), "/forecast/ab%2Fcd%20ef/1.5,2");
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let err = ForecastIoClient::new(ForecastIoOptions {
            base_url: "not a url".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, WeatherError::Network(_)));
    }

    #[test]
    fn default_options_point_at_forecast_io() {
        let opts = ForecastIoOptions::default();
        assert_eq!(opts.base_url, DEFAULT_BASE_URL);
        assert_eq!(opts.timeout, Duration::from_secs(10));
    }
}
