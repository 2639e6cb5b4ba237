use tracing::info;

use crate::{
    config::Config,
    error::Result,
    geo::Geolocator,
    ip::IpResolver,
    model::{Coordinates, Forecast, ForecastRequest},
    present::{self, Report, View},
    provider::ForecastProvider,
};

/// The whole pipeline: locate, fetch, render.
#[derive(Debug)]
pub struct WeatherService {
    ip: Box<dyn IpResolver>,
    geo: Box<dyn Geolocator>,
    provider: Box<dyn ForecastProvider>,
}

impl WeatherService {
    pub fn new(
        ip: Box<dyn IpResolver>,
        geo: Box<dyn Geolocator>,
        provider: Box<dyn ForecastProvider>,
    ) -> Self {
        Self { ip, geo, provider }
    }

    /// Pinned coordinates win; otherwise look up the public IP and geolocate it.
    pub async fn resolve_coordinates(&self, config: &Config) -> Result<Coordinates> {
        if let Some(coords) = config.coordinates() {
            info!(%coords, "using coordinates from config");
            return Ok(coords);
        }

        let ip = self.ip.public_ip().await?;
        let coords = self.geo.locate(ip)?;
        info!(%ip, %coords, "using coordinates from IP geolocation");
        Ok(coords)
    }

    /// Fetch the forecast for wherever the config says we are. The API key
    /// is checked before any network traffic.
    pub async fn forecast(&self, config: &Config) -> Result<Forecast> {
        let api_key = config.require_api_key()?;
        let coords = self.resolve_coordinates(config).await?;
        let request = ForecastRequest::new(api_key, coords)?;

        self.provider.forecast(&request).await
    }

    pub async fn report(&self, config: &Config, view: View) -> Result<Report> {
        let forecast = self.forecast(config).await?;
        Ok(present::render(&forecast, view))
    }
}
