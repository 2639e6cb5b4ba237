use std::{net::IpAddr, path::PathBuf};

use maxminddb::Reader;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::{Result, WeatherError},
    model::Coordinates,
};

/// Maps an IP address to approximate coordinates without touching the network.
pub trait Geolocator: Send + Sync + std::fmt::Debug {
    fn locate(&self, ip: IpAddr) -> Result<Coordinates>;
}

/// Lookup against a GeoLite2-City style MaxMind database.
///
/// The database is opened on first use only, so runs with pinned
/// coordinates never need the file.
#[derive(Debug, Clone)]
pub struct MaxMindGeolocator {
    db_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CityRecord {
    location: Option<LocationRecord>,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl MaxMindGeolocator {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self { db_path: db_path.into() }
    }

    fn open(&self) -> Result<Reader<Vec<u8>>> {
        Reader::open_readfile(&self.db_path).map_err(|e| {
            WeatherError::Geolocation(format!(
                "cannot open GeoIP database {}: {e}",
                self.db_path.display()
            ))
        })
    }
}

impl Geolocator for MaxMindGeolocator {
    #[instrument(skip(self), fields(db = %self.db_path.display()))]
    fn locate(&self, ip: IpAddr) -> Result<Coordinates> {
        let reader = self.open()?;

        let record = reader
            .lookup::<CityRecord>(ip)
            .map_err(|e| WeatherError::Geolocation(format!("no GeoIP record for {ip}: {e}")))?;

        let coords = match record.location {
            Some(LocationRecord { latitude: Some(lat), longitude: Some(lon) }) => {
                Coordinates::new(lat, lon)
            }
            _ => {
                return Err(WeatherError::Geolocation(format!(
                    "GeoIP record for {ip} has no coordinates"
                )));
            }
        };

        debug!(%ip, %coords, "geolocated IP");
        Ok(coords)
    }
}
