//! Current time plus public IP and geolocation.
//!
//! The IP and location lookups are best effort: any failure degrades to
//! `Unknown` / `Unknown location`. Only the time request can fail the call.

use serde::Deserialize;
use tracing::{debug, instrument};

use super::super::{
    NoParams, ToolDefinition,
    common::{IP_LOOKUP_TIMEOUT_SECS, ReportResult, Scalar, fetch_json, or_na},
};
use super::current_time_sentence;
use crate::core::config::Config;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoResponse {
    status: Option<String>,
    city: Option<String>,
    region_name: Option<String>,
    country: Option<String>,
    lat: Option<Scalar>,
    lon: Option<Scalar>,
}

impl GeoResponse {
    fn describe(&self) -> String {
        let name = |v: &Option<String>| v.clone().unwrap_or_else(|| UNKNOWN.to_string());
        format!(
            "{}, {}, {} (Lat: {}, Lon: {})",
            name(&self.city),
            name(&self.region_name),
            name(&self.country),
            or_na(self.lat.as_ref()),
            or_na(self.lon.as_ref()),
        )
    }
}

/// Time-and-location tool implementation.
#[derive(Debug, Clone)]
pub struct TimeAndLocationTool;

impl TimeAndLocationTool {
    /// The server's public IP, or `Unknown`.
    fn public_ip(config: &Config) -> String {
        fetch_json::<IpifyResponse, _>(
            &config.endpoints.ipify_url,
            &[("format", "json")],
            IP_LOOKUP_TIMEOUT_SECS,
        )
        .map_err(|e| debug!("IP lookup failed: {}", e.details()))
        .ok()
        .and_then(|r| r.ip)
        .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// City/region/country line for `ip`, or `Unknown location`.
    fn locate(ip: &str, config: &Config) -> String {
        let url = format!("{}/{}", config.endpoints.ip_api_url, ip);
        let query = [(
            "fields",
            "status,message,country,regionName,city,lat,lon",
        )];

        match fetch_json::<GeoResponse, _>(&url, &query, IP_LOOKUP_TIMEOUT_SECS) {
            Ok(geo) if geo.status.as_deref() == Some("success") => geo.describe(),
            Ok(geo) => {
                debug!("Geolocation status: {}", or_na(geo.status.as_ref()));
                "Unknown location".to_string()
            }
            Err(e) => {
                debug!("Geolocation failed: {}", e.details());
                "Unknown location".to_string()
            }
        }
    }
}

impl ToolDefinition for TimeAndLocationTool {
    const NAME: &'static str = "time_and_location";

    const DESCRIPTION: &'static str = "Get the current time, timezone, public IP address and \
        geographic location (city, region, country, latitude, longitude) of the server, based \
        on its public IP address.";

    type Params = NoParams;

    #[instrument(name = "time_and_location", skip_all)]
    fn report(_params: &NoParams, config: &Config) -> ReportResult {
        let ip = Self::public_ip(config);

        let location = if ip == UNKNOWN {
            String::new()
        } else {
            Self::locate(&ip, config)
        };

        let sentence = current_time_sentence(config)?;
        Ok(format!("{sentence}\nLocation: {location}\nIP: {ip}"))
    }
}
