use std::path::PathBuf;

use thiserror::Error;

/// Every failure the weather pipeline can report.
///
/// The library never terminates the process; the binary decides how to
/// print these and which exit status to use.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No config file at the expected location.
    #[error(
        "Config file not found: {}\nHint: run `weather --setup` to create it.",
        path.display()
    )]
    ConfigMissing { path: PathBuf },

    /// The config file exists but could not be read or understood.
    #[error("Invalid config file {}: {reason}", path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    /// The config has no API key for the forecast provider.
    #[error(
        "You have to provide a Forecast.io API key.\nHint: run `weather --setup` and enter your API key."
    )]
    ConfigIncomplete,

    /// Transport failure or non-success status from a remote service.
    #[error("Network error: {0}")]
    Network(String),

    /// The public IP could not be mapped to coordinates.
    #[error("Geolocation failed: {0}")]
    Geolocation(String),

    /// The forecast response did not have the expected shape.
    #[error("Failed to parse forecast response: {0}")]
    Parse(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

/// Keep error messages readable when a server answers with a whole HTML page.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
