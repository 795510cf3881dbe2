//! Weather and air quality tools backed by Open-Meteo.
//!
//! Forecast data comes from the forecast API, air quality from the CAMS
//! global domain of the air-quality API. Neither needs an API key.

mod current;
mod daily;
mod hourly;

pub use current::{WeatherCurrentParams, WeatherCurrentTool};
pub use daily::{WeatherDailyForecastParams, WeatherDailyForecastTool};
pub use hourly::{WeatherHourlyForecastParams, WeatherHourlyForecastTool};

use super::common::NA;

/// Air-quality model domain requested for every air-quality call.
const AIR_QUALITY_DOMAIN: &str = "cams_global";

/// Coordinates keep a decimal point: `52.0`, not `52`.
fn coordinate(value: f64) -> String {
    format!("{value:?}")
}

/// Query parameters shared by every Open-Meteo request.
fn base_query(latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", coordinate(latitude)),
        ("longitude", coordinate(longitude)),
        ("timezone", "auto".to_string()),
    ]
}

/// First lines of every weather report.
fn location_header(latitude: f64, longitude: f64, timezone: Option<&str>) -> String {
    format!(
        "Location: Latitude {}, Longitude {}\nTimezone: {}\n\n",
        coordinate(latitude),
        coordinate(longitude),
        timezone.unwrap_or(NA)
    )
}
