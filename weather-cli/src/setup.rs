//! Interactive first-run setup: ask for the API key and optional coordinates,
//! then write `weather.conf`.

use std::path::Path;

use anyhow::Context;
use inquire::{CustomUserError, Text, validator::Validation};
use weather_core::{
    Config,
    config::{parse_latitude, parse_longitude},
};

pub fn run(path: &Path) -> anyhow::Result<()> {
    println!("required parameters");
    let api_key = Text::new("Enter the forecast.io api key:")
        .prompt()
        .context("Setup aborted")?;

    println!("optional parameters");
    let latitude = Text::new("Enter the latitude:")
        .with_help_message("leave blank to locate by IP address")
        .with_validator(validate_latitude)
        .prompt()
        .context("Setup aborted")?;
    let longitude = Text::new("Enter the longitude:")
        .with_help_message("leave blank to locate by IP address")
        .with_validator(validate_longitude)
        .prompt()
        .context("Setup aborted")?;

    let config = Config {
        api_key: api_key.trim().to_string(),
        latitude: parse_latitude(&latitude).map_err(anyhow::Error::msg)?,
        longitude: parse_longitude(&longitude).map_err(anyhow::Error::msg)?,
    };

    println!("generating config file...");
    config
        .save_to(path)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("setup complete");
    Ok(())
}

fn validate_latitude(input: &str) -> Result<Validation, CustomUserError> {
    Ok(to_validation(parse_latitude(input)))
}

fn validate_longitude(input: &str) -> Result<Validation, CustomUserError> {
    Ok(to_validation(parse_longitude(input)))
}

fn to_validation(parsed: Result<Option<f64>, String>) -> Validation {
    match parsed {
        Ok(_) => Validation::Valid,
        Err(reason) => Validation::Invalid(reason.into()),
    }
}
