use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::debug;
use weather_core::{
    Config, ForecastIoClient, IpEchoResolver, MaxMindGeolocator, View, WeatherService,
};

use crate::setup;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "How is it outside? Use the weather cli to figure it out."
)]
pub struct Cli {
    /// What you want to know.
    #[arg(long, value_enum, default_value_t = WeatherArg::Now)]
    pub weather: WeatherArg,

    /// Create the config file interactively, then exit.
    #[arg(long)]
    pub setup: bool,

    /// Config file to use instead of `<exe dir>/../config/weather.conf`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GeoIP city database to use instead of `<exe dir>/../config/GeoLite2-City.mmdb`.
    #[arg(long, value_name = "PATH")]
    pub geoip_db: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WeatherArg {
    /// Current conditions.
    Now,
    /// The next 24 hours.
    Hourly,
    /// The next few days.
    Forecast,
}

impl From<WeatherArg> for View {
    fn from(arg: WeatherArg) -> Self {
        match arg {
            WeatherArg::Now => View::Now,
            WeatherArg::Hourly => View::Hourly,
            WeatherArg::Forecast => View::Forecast,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::default_path()?,
        };

        if self.setup {
            return setup::run(&config_path);
        }

        let config = Config::load_from(&config_path)?;

        let geoip_db = match self.geoip_db {
            Some(path) => path,
            None => Config::default_geoip_db_path()?,
        };
        debug!(config = %config_path.display(), geoip_db = %geoip_db.display(), "paths");

        let service = WeatherService::new(
            Box::new(IpEchoResolver::with_defaults()?),
            Box::new(MaxMindGeolocator::new(geoip_db)),
            Box::new(ForecastIoClient::with_defaults()?),
        );

        let view = View::from(self.weather);
        let report = service
            .report(&config, view)
            .await
            .with_context(|| format!("Could not get the {view} weather"))?;

        println!("{report}");
        Ok(())
    }
}
