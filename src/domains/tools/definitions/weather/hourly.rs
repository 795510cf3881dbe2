//! Hour-by-hour forecast with air quality for a coordinate pair.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::super::{
    ToolDefinition,
    common::{DEFAULT_TIMEOUT_SECS, FetchContext, ReportResult, Scalar, column, fetch_json},
    lookup::aqi_label,
};
use super::{AIR_QUALITY_DOMAIN, base_query, location_header};
use crate::core::config::Config;

const FAILURE: &str = "Failed to retrieve hourly forecast";

/// One week of hours.
pub const MAX_FORECAST_HOURS: i64 = 168;

const HOURLY_WEATHER_VARS: &str = "temperature_2m,apparent_temperature,precipitation,\
    precipitation_probability,wind_speed_10m,uv_index";
const HOURLY_AIR_VARS: &str = "us_aqi,pm2_5";

fn default_hours() -> i64 {
    24
}

/// Parameters for the hourly forecast tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WeatherHourlyForecastParams {
    #[schemars(description = "Latitude coordinate (-90 to 90)")]
    pub latitude: f64,

    #[schemars(description = "Longitude coordinate (-180 to 180)")]
    pub longitude: f64,

    #[schemars(description = "Number of forecast hours (1-168, default: 24)")]
    #[serde(default = "default_hours")]
    pub hours: i64,
}

#[derive(Debug, Deserialize)]
struct WeatherHourlyResponse {
    timezone: Option<String>,
    hourly: Option<WeatherHourly>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WeatherHourly {
    time: Vec<Option<Scalar>>,
    temperature_2m: Vec<Option<Scalar>>,
    apparent_temperature: Vec<Option<Scalar>>,
    precipitation: Vec<Option<Scalar>>,
    wind_speed_10m: Vec<Option<Scalar>>,
    uv_index: Vec<Option<Scalar>>,
}

#[derive(Debug, Deserialize)]
struct AirHourlyResponse {
    hourly: Option<AirHourly>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AirHourly {
    us_aqi: Vec<Option<Scalar>>,
    pm2_5: Vec<Option<Scalar>>,
}

fn render_hour(weather: &WeatherHourly, air: &AirHourly, i: usize) -> String {
    let level = aqi_label(
        air.us_aqi
            .get(i)
            .and_then(Option::as_ref)
            .and_then(Scalar::as_f64),
    );

    format!(
        "{}: {}°C (Feels {}°C), Wind {} km/h, Precip {} mm, UV {}, AQI {} ({level}), PM2.5 {} μg/m³\n",
        column(&weather.time, i),
        column(&weather.temperature_2m, i),
        column(&weather.apparent_temperature, i),
        column(&weather.wind_speed_10m, i),
        column(&weather.precipitation, i),
        column(&weather.uv_index, i),
        column(&air.us_aqi, i),
        column(&air.pm2_5, i),
    )
}

/// Hourly forecast tool implementation.
#[derive(Debug, Clone)]
pub struct WeatherHourlyForecastTool;

impl ToolDefinition for WeatherHourlyForecastTool {
    const NAME: &'static str = "weather_hourly_forecast";

    const DESCRIPTION: &'static str = "Get an hourly weather and air quality forecast (1-168 \
        hours, default 24) for a latitude/longitude using Open-Meteo: temperature, feels-like, \
        wind, precipitation, UV index, US AQI with level and PM2.5, one line per hour.";

    type Params = WeatherHourlyForecastParams;

    #[instrument(name = "weather_hourly_forecast", skip(config))]
    fn report(params: &WeatherHourlyForecastParams, config: &Config) -> ReportResult {
        let hours = params.hours.clamp(1, MAX_FORECAST_HOURS);
        let forecast_days = (hours / 24 + 1).to_string();

        let mut weather_query = base_query(params.latitude, params.longitude);
        weather_query.push(("forecast_days", forecast_days.clone()));
        weather_query.push(("hourly", HOURLY_WEATHER_VARS.to_string()));

        let mut air_query = base_query(params.latitude, params.longitude);
        air_query.push(("forecast_days", forecast_days));
        air_query.push(("hourly", HOURLY_AIR_VARS.to_string()));
        air_query.push(("domains", AIR_QUALITY_DOMAIN.to_string()));

        let weather: WeatherHourlyResponse = fetch_json(
            &config.endpoints.open_meteo_forecast_url,
            &weather_query,
            DEFAULT_TIMEOUT_SECS,
        )
        .context(FAILURE)?;

        let air: AirHourlyResponse = fetch_json(
            &config.endpoints.open_meteo_air_quality_url,
            &air_query,
            DEFAULT_TIMEOUT_SECS,
        )
        .context(FAILURE)?;

        let mut out = location_header(
            params.latitude,
            params.longitude,
            weather.timezone.as_deref(),
        );
        out.push_str(&format!("{hours}-Hour Forecast\n\n"));

        if let Some(hourly) = &weather.hourly {
            let air_hourly = air.hourly.unwrap_or_default();
            // `hours` is clamped to 1..=168, so the cast is lossless.
            let count = hourly.time.len().min(hours as usize);
            for i in 0..count {
                out.push_str(&render_hour(hourly, &air_hourly, i));
            }
        }
        Ok(out)
    }
}
