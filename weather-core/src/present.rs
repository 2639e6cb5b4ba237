//! Turns a [`Forecast`] into the text report printed by the CLI.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde_json::Number;

use crate::model::Forecast;

pub mod table;

pub use table::{Align, Column, Table};

/// The hourly view never shows more than a day.
pub const HOURLY_LIMIT: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Now,
    Hourly,
    Forecast,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Now => "now",
            View::Hourly => "hourly",
            View::Forecast => "forecast",
        }
    }

    pub const fn all() -> &'static [View] {
        &[View::Now, View::Hourly, View::Forecast]
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "now" => Ok(View::Now),
            "hourly" => Ok(View::Hourly),
            "forecast" => Ok(View::Forecast),
            _ => Err(format!("Unknown view '{s}'. Supported views: now, hourly, forecast.")),
        }
    }
}

/// Title plus table, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub table: Table,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.title)?;
        write!(f, "{}", self.table)
    }
}

/// Render using the machine's local timezone and today's local date.
pub fn render(forecast: &Forecast, view: View) -> Report {
    render_at(forecast, view, &Local, Local::now().date_naive())
}

pub fn render_at<Tz: TimeZone>(
    forecast: &Forecast,
    view: View,
    tz: &Tz,
    today: NaiveDate,
) -> Report {
    let location = forecast.location_name();

    match view {
        View::Now => {
            let now = &forecast.currently;
            let mut table = Table::new(vec![
                Column::left("summary"),
                Column::right("temp"),
                Column::right("feels"),
                Column::right("humidity"),
            ]);
            table.push_row(vec![
                now.summary.clone(),
                format_temperature(&now.temperature),
                format_temperature(&now.apparent_temperature),
                format_percent(now.humidity),
            ]);

            Report { title: format!("{location} now"), table }
        }
        View::Hourly => {
            let hours = &forecast.hourly.data[..forecast.hourly.data.len().min(HOURLY_LIMIT)];
            let mut table = Table::new(vec![
                Column::left("hour"),
                Column::left("summary"),
                Column::right("temp"),
                Column::right("feels"),
                Column::right("humidity"),
            ]);
            for hour in hours {
                table.push_row(vec![
                    hour_label(hour.time, tz),
                    hour.summary.clone(),
                    format_temperature(&hour.temperature),
                    format_temperature(&hour.apparent_temperature),
                    format_percent(hour.humidity),
                ]);
            }

            Report { title: format!("{location} forecast next {} hours", hours.len()), table }
        }
        View::Forecast => {
            let days = &forecast.daily.data;
            let mut table = Table::new(vec![
                Column::left("day"),
                Column::left("summary"),
                Column::right("min"),
                Column::right("max"),
                Column::right("humidity"),
                Column::right("rain"),
            ]);
            for day in days {
                table.push_row(vec![
                    day_label(day.time, tz, today),
                    day.summary.clone(),
                    format_temperature(&day.temperature_min),
                    format_temperature(&day.temperature_max),
                    format_percent(day.humidity),
                    format_percent(day.precip_probability),
                ]);
            }

            Report { title: format!("{location} forecast next {} days", days.len()), table }
        }
    }
}

/// The provider's number as written: `21.5` -> `21.5 C`, `20.0` -> `20.0 C`.
pub fn format_temperature(celsius: &Number) -> String {
    format!("{celsius} C")
}

/// Fraction to whole percent, truncated toward zero: `0.4999` -> `49%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).trunc() as i64)
}

/// `Today` for today's local date, otherwise the full weekday name.
pub fn day_label<Tz: TimeZone>(time: DateTime<Utc>, tz: &Tz, today: NaiveDate) -> String {
    let local = time.with_timezone(tz).naive_local();
    if local.date() == today {
        "Today".to_string()
    } else {
        local.format("%A").to_string()
    }
}

/// Local wall-clock time, 24h `HH:MM`.
pub fn hour_label<Tz: TimeZone>(time: DateTime<Utc>, tz: &Tz) -> String {
    time.with_timezone(tz).naive_local().format("%H:%M").to_string()
}
