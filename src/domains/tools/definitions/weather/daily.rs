//! Multi-day forecast for a coordinate pair.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::super::{
    ToolDefinition,
    common::{DEFAULT_TIMEOUT_SECS, FetchContext, ReportResult, Scalar, column, fetch_json},
    lookup::weather_condition,
};
use super::{base_query, location_header};
use crate::core::config::Config;

const FAILURE: &str = "Failed to retrieve daily forecast";

/// Open-Meteo accepts 1 to 16 forecast days.
pub const MAX_FORECAST_DAYS: i64 = 16;

const DAILY_VARS: &str = "weather_code,temperature_2m_max,temperature_2m_min,\
    apparent_temperature_max,apparent_temperature_min,sunrise,sunset,wind_speed_10m_max,\
    precipitation_sum,precipitation_probability_max";

fn default_days() -> i64 {
    7
}

/// Parameters for the daily forecast tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WeatherDailyForecastParams {
    #[schemars(description = "Latitude coordinate (-90 to 90)")]
    pub latitude: f64,

    #[schemars(description = "Longitude coordinate (-180 to 180)")]
    pub longitude: f64,

    #[schemars(description = "Number of forecast days (1-16, default: 7)")]
    #[serde(default = "default_days")]
    pub days: i64,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    timezone: Option<String>,
    daily: Option<Daily>,
}

/// Column-oriented daily data: entry `i` of every column belongs to `time[i]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Daily {
    time: Vec<Option<Scalar>>,
    weather_code: Vec<Option<Scalar>>,
    temperature_2m_max: Vec<Option<Scalar>>,
    temperature_2m_min: Vec<Option<Scalar>>,
    apparent_temperature_max: Vec<Option<Scalar>>,
    apparent_temperature_min: Vec<Option<Scalar>>,
    sunrise: Vec<Option<Scalar>>,
    sunset: Vec<Option<Scalar>>,
    wind_speed_10m_max: Vec<Option<Scalar>>,
    precipitation_sum: Vec<Option<Scalar>>,
    precipitation_probability_max: Vec<Option<Scalar>>,
}

impl Daily {
    fn render_day(&self, i: usize, out: &mut String) {
        let code = self.weather_code.get(i).and_then(Option::as_ref);

        out.push_str(&format!("[{}]\n", column(&self.time, i)));
        out.push_str(&format!("  Condition: {}\n", weather_condition(code)));
        out.push_str(&format!(
            "  Temperature: {}°C ~ {}°C\n",
            column(&self.temperature_2m_min, i),
            column(&self.temperature_2m_max, i)
        ));
        out.push_str(&format!(
            "  Feels Like: {}°C ~ {}°C\n",
            column(&self.apparent_temperature_min, i),
            column(&self.apparent_temperature_max, i)
        ));
        out.push_str(&format!(
            "  Max Wind Speed: {} km/h\n",
            column(&self.wind_speed_10m_max, i)
        ));
        out.push_str(&format!(
            "  Precipitation: {} mm (Probability: {}%)\n",
            column(&self.precipitation_sum, i),
            column(&self.precipitation_probability_max, i)
        ));
        out.push_str(&format!(
            "  Sunrise: {} | Sunset: {}\n\n",
            column(&self.sunrise, i),
            column(&self.sunset, i)
        ));
    }
}

/// Daily forecast tool implementation.
#[derive(Debug, Clone)]
pub struct WeatherDailyForecastTool;

impl ToolDefinition for WeatherDailyForecastTool {
    const NAME: &'static str = "weather_daily_forecast";

    const DESCRIPTION: &'static str = "Get a daily weather forecast (1-16 days, default 7) for a \
        latitude/longitude using Open-Meteo: condition, min/max temperature, feels-like range, \
        max wind speed, precipitation and its probability, sunrise and sunset.";

    type Params = WeatherDailyForecastParams;

    #[instrument(name = "weather_daily_forecast", skip(config))]
    fn report(params: &WeatherDailyForecastParams, config: &Config) -> ReportResult {
        let days = params.days.clamp(1, MAX_FORECAST_DAYS);

        let mut query = base_query(params.latitude, params.longitude);
        query.push(("forecast_days", days.to_string()));
        query.push(("daily", DAILY_VARS.to_string()));

        let data: DailyResponse = fetch_json(
            &config.endpoints.open_meteo_forecast_url,
            &query,
            DEFAULT_TIMEOUT_SECS,
        )
        .context(FAILURE)?;

        let mut out = location_header(params.latitude, params.longitude, data.timezone.as_deref());
        if let Some(daily) = &data.daily {
            out.push_str(&format!("{days}-Day Forecast\n\n"));
            for i in 0..daily.time.len() {
                daily.render_day(i, &mut out);
            }
        }
        Ok(out)
    }
}
