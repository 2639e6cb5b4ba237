//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration loading and saving (`weather.conf`)
//! - Public IP lookup and offline IP geolocation
//! - The forecast.io client and its typed response model
//! - The presenter that turns a forecast into a text table
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod geo;
pub mod ip;
pub mod model;
pub mod present;
pub mod provider;
pub mod service;

pub use config::Config;
pub use error::{Result, WeatherError};
pub use geo::{Geolocator, MaxMindGeolocator};
pub use ip::{IpEchoResolver, IpResolver};
pub use model::{Coordinates, Forecast, ForecastRequest};
pub use present::{Report, View};
pub use provider::{ForecastIoClient, ForecastIoOptions, ForecastProvider};
pub use service::WeatherService;
