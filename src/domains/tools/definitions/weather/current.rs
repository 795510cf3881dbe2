//! Current weather and air quality for a coordinate pair.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::super::{
    ToolDefinition,
    common::{DEFAULT_TIMEOUT_SECS, FetchContext, ReportResult, Scalar, fetch_json, or_na},
    lookup::{aqi_label, weather_condition},
};
use super::{AIR_QUALITY_DOMAIN, base_query, location_header};
use crate::core::config::Config;

const FAILURE: &str = "Failed to retrieve data";

const CURRENT_WEATHER_VARS: &str =
    "temperature_2m,apparent_temperature,wind_speed_10m,precipitation,weather_code,is_day";
const CURRENT_AIR_VARS: &str = "us_aqi,pm10,pm2_5,carbon_monoxide";

/// Parameters for the current weather tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WeatherCurrentParams {
    #[schemars(description = "Latitude coordinate (-90 to 90)")]
    pub latitude: f64,

    #[schemars(description = "Longitude coordinate (-180 to 180)")]
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    timezone: Option<String>,
    current: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    time: Option<Scalar>,
    temperature_2m: Option<Scalar>,
    apparent_temperature: Option<Scalar>,
    wind_speed_10m: Option<Scalar>,
    precipitation: Option<Scalar>,
    weather_code: Option<Scalar>,
    is_day: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    current: Option<CurrentAir>,
}

#[derive(Debug, Deserialize)]
struct CurrentAir {
    us_aqi: Option<Scalar>,
    pm10: Option<Scalar>,
    pm2_5: Option<Scalar>,
    carbon_monoxide: Option<Scalar>,
}

impl CurrentWeather {
    fn render(&self, out: &mut String) {
        let is_day = self.is_day.as_ref().and_then(Scalar::as_f64) == Some(1.0);

        out.push_str("Current Weather\n");
        out.push_str(&format!("  - Time: {}\n", or_na(self.time.as_ref())));
        out.push_str(&format!(
            "  - Condition: {}\n",
            weather_condition(self.weather_code.as_ref())
        ));
        out.push_str(&format!(
            "  - Temperature: {}°C\n",
            or_na(self.temperature_2m.as_ref())
        ));
        out.push_str(&format!(
            "  - Feels Like: {}°C\n",
            or_na(self.apparent_temperature.as_ref())
        ));
        out.push_str(&format!(
            "  - Wind Speed: {} km/h\n",
            or_na(self.wind_speed_10m.as_ref())
        ));
        out.push_str(&format!(
            "  - Precipitation: {} mm\n",
            or_na(self.precipitation.as_ref())
        ));
        out.push_str(&format!(
            "  - Day/Night: {}\n\n",
            if is_day { "Day" } else { "Night" }
        ));
    }
}

impl CurrentAir {
    fn render(&self, out: &mut String) {
        let level = aqi_label(self.us_aqi.as_ref().and_then(Scalar::as_f64));

        out.push_str("Current Air Quality\n");
        out.push_str(&format!(
            "  - US AQI: {} ({level})\n",
            or_na(self.us_aqi.as_ref())
        ));
        out.push_str(&format!("  - PM10: {} μg/m³\n", or_na(self.pm10.as_ref())));
        out.push_str(&format!("  - PM2.5: {} μg/m³\n", or_na(self.pm2_5.as_ref())));
        out.push_str(&format!(
            "  - Carbon Monoxide: {} μg/m³\n",
            or_na(self.carbon_monoxide.as_ref())
        ));
    }
}

/// Current weather tool implementation.
#[derive(Debug, Clone)]
pub struct WeatherCurrentTool;

impl ToolDefinition for WeatherCurrentTool {
    const NAME: &'static str = "weather_current";

    const DESCRIPTION: &'static str = "Get current weather (condition, temperature, feels-like, \
        wind, precipitation, day/night) and current air quality (US AQI with level, PM10, PM2.5, \
        carbon monoxide) for a latitude/longitude using Open-Meteo.";

    type Params = WeatherCurrentParams;

    #[instrument(name = "weather_current", skip(config))]
    fn report(params: &WeatherCurrentParams, config: &Config) -> ReportResult {
        let mut weather_query = base_query(params.latitude, params.longitude);
        weather_query.push(("current", CURRENT_WEATHER_VARS.to_string()));

        let mut air_query = base_query(params.latitude, params.longitude);
        air_query.push(("current", CURRENT_AIR_VARS.to_string()));
        air_query.push(("domains", AIR_QUALITY_DOMAIN.to_string()));

        let weather: ForecastResponse = fetch_json(
            &config.endpoints.open_meteo_forecast_url,
            &weather_query,
            DEFAULT_TIMEOUT_SECS,
        )
        .context(FAILURE)?;

        let air: AirQualityResponse = fetch_json(
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
        if let Some(current) = &weather.current {
            current.render(&mut out);
        }
        if let Some(current) = &air.current {
            current.render(&mut out);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::render_text;
    use crate::domains::tools::definitions::common::stub::{Route, StubServer, param, refused_config};
    use serde_json::json;

    fn params() -> WeatherCurrentParams {
        WeatherCurrentParams {
            latitude: 52.52,
            longitude: 13.41,
        }
    }

    #[test]
    fn test_full_report() {
        let stub = StubServer::start(vec![
            Route::json(
                "/v1/forecast",
                json!({
                    "timezone": "Europe/Berlin",
                    "current": {
                        "time": "2024-03-05T14:00",
                        "temperature_2m": 8.4,
                        "apparent_temperature": 5.1,
                        "wind_speed_10m": 12.0,
                        "precipitation": 0.0,
                        "weather_code": 3,
                        "is_day": 1
                    }
                }),
            ),
            Route::json(
                "/v1/air-quality",
                json!({
                    "current": {
                        "us_aqi": 42,
                        "pm10": 14.2,
                        "pm2_5": 9.8,
                        "carbon_monoxide": 210.0
                    }
                }),
            ),
        ]);

        let text = render_text(WeatherCurrentTool::report(&params(), &stub.config()));
        assert_eq!(
            text,
            "Location: Latitude 52.52, Longitude 13.41\n\
             Timezone: Europe/Berlin\n\n\
             Current Weather\n\
             \x20 - Time: 2024-03-05T14:00\n\
             \x20 - Condition: Overcast\n\
             \x20 - Temperature: 8.4°C\n\
             \x20 - Feels Like: 5.1°C\n\
             \x20 - Wind Speed: 12.0 km/h\n\
             \x20 - Precipitation: 0.0 mm\n\
             \x20 - Day/Night: Day\n\n\
             Current Air Quality\n\
             \x20 - US AQI: 42 (Good)\n\
             \x20 - PM10: 14.2 μg/m³\n\
             \x20 - PM2.5: 9.8 μg/m³\n\
             \x20 - Carbon Monoxide: 210.0 μg/m³\n"
        );

        let weather_query = stub.query_for("/v1/forecast");
        assert_eq!(param(&weather_query, "current"), Some(CURRENT_WEATHER_VARS));
        assert_eq!(param(&weather_query, "timezone"), Some("auto"));

        let air_query = stub.query_for("/v1/air-quality");
        assert_eq!(param(&air_query, "domains"), Some("cams_global"));
        assert_eq!(param(&air_query, "current"), Some(CURRENT_AIR_VARS));
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let stub = StubServer::start(vec![
            Route::json("/v1/forecast", json!({ "current": { "time": "2024-03-05T02:00" } })),
            Route::json("/v1/air-quality", json!({ "current": {} })),
        ]);

        let text = render_text(WeatherCurrentTool::report(&params(), &stub.config()));
        assert!(text.contains("Timezone: N/A\n"));
        assert!(text.contains("  - Condition: Clear sky\n"));
        assert!(text.contains("  - Temperature: N/A°C\n"));
        assert!(text.contains("  - Day/Night: Night\n"));
        assert!(text.contains("  - US AQI: N/A (Unknown)\n"));
        assert!(text.contains("  - PM10: N/A μg/m³\n"));
    }

    #[test]
    fn test_fractional_weather_code_is_unknown() {
        let stub = StubServer::start(vec![
            Route::json("/v1/forecast", json!({ "current": { "weather_code": 3.5 } })),
            Route::json("/v1/air-quality", json!({ "current": {} })),
        ]);

        let text = render_text(WeatherCurrentTool::report(&params(), &stub.config()));
        assert!(text.contains("  - Condition: Unknown weather (code: 3.5)\n"), "{text}");
    }

    #[test]
    fn test_blocks_omitted_without_current() {
        let stub = StubServer::start(vec![
            Route::json("/v1/forecast", json!({ "timezone": "UTC" })),
            Route::json("/v1/air-quality", json!({})),
        ]);

        let text = render_text(WeatherCurrentTool::report(&params(), &stub.config()));
        assert_eq!(text, "Location: Latitude 52.52, Longitude 13.41\nTimezone: UTC\n\n");
    }

    #[test]
    fn test_air_quality_failure_fails_the_call() {
        let stub = StubServer::start(vec![
            Route::json("/v1/forecast", json!({ "timezone": "UTC" })),
            Route::status("/v1/air-quality", 500),
        ]);

        let text = render_text(WeatherCurrentTool::report(&params(), &stub.config()));
        assert!(text.starts_with("Failed to retrieve data: "));
    }

    #[test]
    fn test_connection_refused() {
        let text = render_text(WeatherCurrentTool::report(&params(), &refused_config()));
        assert!(text.starts_with("Failed to retrieve data: "));
        assert!(text.contains("error sending request"));
    }
}
