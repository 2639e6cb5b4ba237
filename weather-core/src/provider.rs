use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    model::{Forecast, ForecastRequest},
};

pub mod forecastio;

pub use forecastio::{ForecastIoClient, ForecastIoOptions};

/// Source of forecast data for a pair of coordinates.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn forecast(&self, request: &ForecastRequest) -> Result<Forecast>;
}
