use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{Result, WeatherError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Everything a provider needs for one forecast lookup.
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    api_key: String,
    pub coordinates: Coordinates,
}

impl ForecastRequest {
    /// Fails with [`WeatherError::ConfigIncomplete`] when the key is blank.
    pub fn new(api_key: &str, coordinates: Coordinates) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(WeatherError::ConfigIncomplete);
        }

        Ok(Self { api_key: api_key.to_string(), coordinates })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Forecast payload in the forecast.io format, requested with `units=si`.
///
/// Temperatures stay as JSON numbers so they print exactly as sent
/// (`20` and `20.0` are different strings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub timezone: String,
    pub currently: Currently,
    pub hourly: DataBlock<HourlyPoint>,
    pub daily: DataBlock<DailyPoint>,
}

impl Forecast {
    /// `America/New_York` becomes `America New York`.
    pub fn location_name(&self) -> String {
        self.timezone.replace(['_', '/'], " ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataBlock<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currently {
    pub summary: String,
    pub temperature: Number,
    pub apparent_temperature: Number,
    pub humidity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    pub summary: String,
    pub temperature: Number,
    pub apparent_temperature: Number,
    pub humidity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    pub summary: String,
    pub temperature_min: Number,
    pub temperature_max: Number,
    pub humidity: f64,
    pub precip_probability: f64,
}
