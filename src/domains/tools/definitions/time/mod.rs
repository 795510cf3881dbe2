//! World time tools backed by worldtimeapi.org.
//!
//! Both tools resolve the caller's timezone from the public IP of the
//! machine running the server.

mod by_ip;
mod location;

pub use by_ip::TimeByIpTool;
pub use location::TimeAndLocationTool;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Deserialize;

use super::common::{DEFAULT_TIMEOUT_SECS, FetchContext, NA, ReportError, fetch_json};
use super::lookup::weekday_name;
use crate::core::config::Config;

/// Failure prefix shared by both time tools.
pub(crate) const TIME_FAILURE: &str = "Failed to get time information";

/// The subset of worldtimeapi's `/ip` response the tools use.
#[derive(Debug, Deserialize)]
struct WorldTimeResponse {
    timezone: Option<String>,
    datetime: Option<String>,
    /// 0 = Sunday.
    day_of_week: Option<i64>,
}

/// A datetime as worldtimeapi reports it, with or without an offset.
enum LocalTime {
    Offset(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl LocalTime {
    fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => Ok(Self::Offset(dt)),
            Err(e) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(Self::Naive)
                .map_err(|_| e),
        }
    }

    fn format(&self, fmt: &str) -> String {
        match self {
            Self::Offset(dt) => dt.format(fmt).to_string(),
            Self::Naive(dt) => dt.format(fmt).to_string(),
        }
    }
}

/// Fetch the current time for the caller's IP and describe it in one sentence.
fn current_time_sentence(config: &Config) -> Result<String, ReportError> {
    let url = format!("{}/ip", config.endpoints.worldtime_url);
    let data: WorldTimeResponse =
        fetch_json(&url, &[] as &[(&str, &str)], DEFAULT_TIMEOUT_SECS).context(TIME_FAILURE)?;

    let raw = data.datetime.unwrap_or_default();
    let local = LocalTime::parse(&raw).map_err(|e| ReportError::Failed {
        context: TIME_FAILURE,
        details: format!("invalid datetime '{raw}': {e}"),
    })?;

    let weekday = weekday_name(data.day_of_week.unwrap_or(0));
    let timezone = data.timezone.as_deref().unwrap_or(NA);

    Ok(format!(
        "It is currently {weekday}, {}, {} in {timezone} timezone",
        local.format("%B %d, %Y"),
        local.format("%I:%M:%S %p"),
    ))
}
