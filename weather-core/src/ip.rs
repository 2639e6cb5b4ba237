use std::{net::IpAddr, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::{Result, WeatherError, truncate_body};

pub const DEFAULT_IP_ECHO_URL: &str = "http://ipecho.net/plain";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Finds the caller's public IP address.
#[async_trait]
pub trait IpResolver: Send + Sync + std::fmt::Debug {
    async fn public_ip(&self) -> Result<IpAddr>;
}

/// Asks a plain-text "what is my IP" echo service.
#[derive(Debug, Clone)]
pub struct IpEchoResolver {
    url: String,
    http: Client,
}

impl IpEchoResolver {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { url: url.into(), http })
    }

    /// ipecho.net with a 10 second timeout.
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_IP_ECHO_URL, DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl IpResolver for IpEchoResolver {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn public_ip(&self) -> Result<IpAddr> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| WeatherError::Network(format!("failed to reach IP echo service: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Network(format!("failed to read IP echo response: {e}")))?;

        if !status.is_success() {
            return Err(WeatherError::Network(format!(
                "IP echo service answered {status}: {}",
                truncate_body(&body)
            )));
        }

        let raw = body.trim();
        let ip = raw.parse::<IpAddr>().map_err(|_| {
            WeatherError::Geolocation(format!("'{}' is not an IP address", truncate_body(raw)))
        })?;

        debug!(%ip, "resolved public IP");
        Ok(ip)
    }
}
