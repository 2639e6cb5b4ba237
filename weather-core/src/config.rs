use std::{
    fs,
    path::{Path, PathBuf},
};

use ini::{Ini, WriteOption};
use tracing::debug;

use crate::{
    error::{Result, WeatherError},
    model::Coordinates,
};

const SECTION: &str = "forecast";
const CONFIG_FILE: &str = "weather.conf";
const GEOIP_DB_FILE: &str = "GeoLite2-City.mmdb";

/// Settings read from `weather.conf`.
///
/// Example file:
/// ```text
/// [forecast]
/// key = 0123456789abcdef
/// latitude = 38.72
/// longitude = -9.14
/// ```
///
/// Leaving latitude or longitude blank means "locate me by IP".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Config {
    /// Coordinates pinned in the config, if both halves are present.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        }
    }

    /// The API key, or [`WeatherError::ConfigIncomplete`] when it is blank.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.trim() {
            "" => Err(WeatherError::ConfigIncomplete),
            key => Ok(key),
        }
    }

    /// Load from the default location next to the executable.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(WeatherError::ConfigMissing { path: path.to_path_buf() });
        }

        let contents = fs::read_to_string(path)
            .map_err(|source| WeatherError::Io { path: path.to_path_buf(), source })?;

        let cfg = Self::parse(&contents).map_err(|reason| WeatherError::ConfigInvalid {
            path: path.to_path_buf(),
            reason,
        })?;

        debug!(path = %path.display(), pinned = cfg.coordinates().is_some(), "loaded config");
        Ok(cfg)
    }

    fn parse(contents: &str) -> std::result::Result<Self, String> {
        let ini = Ini::load_from_str(contents).map_err(|e| e.to_string())?;

        let section = ini
            .section(Some(SECTION))
            .ok_or_else(|| format!("missing [{SECTION}] section"))?;

        let api_key = section.get("key").unwrap_or_default().trim().to_string();
        let latitude = parse_latitude(section.get("latitude").unwrap_or_default())?;
        let longitude = parse_longitude(section.get("longitude").unwrap_or_default())?;

        Ok(Self { api_key, latitude, longitude })
    }

    /// Write the config, replacing whatever was there.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| WeatherError::Io { path: parent.to_path_buf(), source })?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some(SECTION))
            .set("key", self.api_key.as_str())
            .set("latitude", optional_to_string(self.latitude))
            .set("longitude", optional_to_string(self.longitude));

        let opt = WriteOption { kv_separator: " = ", ..Default::default() };
        ini.write_to_file_opt(path, opt)
            .map_err(|source| WeatherError::Io { path: path.to_path_buf(), source })?;

        debug!(path = %path.display(), "wrote config");
        Ok(())
    }

    /// `<exe dir>/../config/weather.conf`
    pub fn default_path() -> Result<PathBuf> {
        Ok(install_config_dir()?.join(CONFIG_FILE))
    }

    /// `<exe dir>/../config/GeoLite2-City.mmdb`
    pub fn default_geoip_db_path() -> Result<PathBuf> {
        Ok(install_config_dir()?.join(GEOIP_DB_FILE))
    }
}

/// The `config` directory sits beside the directory holding the binary.
fn install_config_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|source| WeatherError::Io { path: PathBuf::from("<current executable>"), source })?;

    let bin_dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(bin_dir.join("..").join("config"))
}

/// Blank means "not configured"; anything else must be a float in -90..90.
pub fn parse_latitude(raw: &str) -> std::result::Result<Option<f64>, String> {
    parse_coordinate(raw, "latitude", 90.0)
}

/// Blank means "not configured"; anything else must be a float in -180..180.
pub fn parse_longitude(raw: &str) -> std::result::Result<Option<f64>, String> {
    parse_coordinate(raw, "longitude", 180.0)
}

fn parse_coordinate(raw: &str, name: &str, limit: f64) -> std::result::Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let value: f64 = raw.parse().map_err(|_| format!("{name} '{raw}' is not a number"))?;
    if !(-limit..=limit).contains(&value) {
        return Err(format!("{name} {value} is outside -{limit}..{limit}"));
    }

    Ok(Some(value))
}

fn optional_to_string(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
