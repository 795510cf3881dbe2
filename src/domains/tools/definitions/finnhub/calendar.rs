//! Upcoming earnings releases.

use chrono::{Local, NaiveDate, TimeDelta};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::super::{ToolDefinition, common::{ReportError, ReportResult}};
use super::{FinnhubClient, Record, array, field, finish, push_item, records};
use crate::core::config::Config;

const FAILURE: &str = "Failed to get earnings calendar";

/// Number of calendar entries listed.
pub const CALENDAR_LIMIT: usize = 20;

fn default_days() -> i64 {
    30
}

/// Parameters for the earnings calendar tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FinnhubEarningsCalendarParams {
    #[schemars(description = "Start date, YYYY-MM-DD (default: today)")]
    #[serde(default)]
    pub from_date: Option<String>,

    #[schemars(description = "End date, YYYY-MM-DD (default: today plus `days`)")]
    #[serde(default)]
    pub to_date: Option<String>,

    #[schemars(description = "Days ahead when no end date is given (default: 30)")]
    #[serde(default = "default_days")]
    pub days: i64,
}

impl FinnhubEarningsCalendarParams {
    /// Resolve the date window relative to `today`; blank dates use the defaults.
    fn window(&self, today: NaiveDate) -> Result<(String, String), ReportError> {
        let given = |date: &Option<String>| {
            date.as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from)
        };

        let from = given(&self.from_date).unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
        let to = match given(&self.to_date) {
            Some(to) => to,
            None => TimeDelta::try_days(self.days)
                .and_then(|ahead| today.checked_add_signed(ahead))
                .ok_or_else(|| ReportError::Failed {
                    context: FAILURE,
                    details: format!("date value out of range: {} days ahead", self.days),
                })?
                .format("%Y-%m-%d")
                .to_string(),
        };
        Ok((from, to))
    }
}

/// Finnhub earnings calendar tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubEarningsCalendarTool;

impl ToolDefinition for FinnhubEarningsCalendarTool {
    const NAME: &'static str = "finnhub_earnings_calendar";

    const DESCRIPTION: &'static str = "Get the earnings release calendar from Finnhub for a date \
        range (default: the next 30 days): symbol, date, EPS estimate and release hour.";

    type Params = FinnhubEarningsCalendarParams;

    #[instrument(name = "finnhub_earnings_calendar", skip(config))]
    fn report(params: &FinnhubEarningsCalendarParams, config: &Config) -> ReportResult {
        let client = FinnhubClient::from_config(config)?;
        let (from, to) = params.window(Local::now().date_naive())?;

        let data: Record = client.get(
            "/calendar/earnings",
            &[("from", from.as_str()), ("to", to.as_str())],
            FAILURE,
        )?;
        let Some(events) = array(&data, "earningsCalendar") else {
            return Err(ReportError::not_found(format!(
                "No earnings calendar found for {from} to {to}"
            )));
        };

        let mut out = format!("Earnings Calendar ({from} to {to}):\n\n");
        for (i, event) in records(events, CALENDAR_LIMIT).enumerate() {
            push_item(
                &mut out,
                i + 1,
                &field(event, "symbol"),
                &[
                    ("Date", field(event, "date")),
                    ("EPS Estimate", format!("${}", field(event, "epsEstimate"))),
                    ("Hour", field(event, "hour")),
                ],
            );
        }
        Ok(finish(out))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{assert_token, finnhub_stub, keyless_config};
    use super::*;
    use crate::domains::tools::definitions::common::{
        render_text,
        stub::{param, refused_config},
    };
    use serde_json::json;

    fn params(from: Option<&str>, to: Option<&str>) -> FinnhubEarningsCalendarParams {
        FinnhubEarningsCalendarParams {
            from_date: from.map(String::from),
            to_date: to.map(String::from),
            days: default_days(),
        }
    }

    #[test]
    fn test_default_window() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            params(None, None).window(today).unwrap(),
            ("2024-03-05".to_string(), "2024-04-04".to_string())
        );
        assert_eq!(
            params(Some(""), Some("2024-12-31")).window(today).unwrap(),
            ("2024-03-05".to_string(), "2024-12-31".to_string())
        );

        let mut week = params(Some("2024-01-01"), None);
        week.days = 7;
        assert_eq!(
            week.window(today).unwrap(),
            ("2024-01-01".to_string(), "2024-03-12".to_string())
        );
    }

    #[test]
    fn test_window_overflow_is_a_failure() {
        let mut far = params(None, None);
        far.days = i64::MAX;
        let err = far.window(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to get earnings calendar: "));
    }

    #[test]
    fn test_calendar_truncated_to_twenty() {
        let events: Vec<_> = (0..25)
            .map(|i| {
                json!({
                    "symbol": format!("SYM{i}"),
                    "date": "2024-03-07",
                    "epsEstimate": 1.25,
                    "hour": "amc"
                })
            })
            .collect();
        let stub = finnhub_stub(
            "/finnhub/v1/calendar/earnings",
            json!({ "earningsCalendar": events }),
        );

        let text = render_text(FinnhubEarningsCalendarTool::report(
            &params(Some("2024-03-01"), Some("2024-03-31")),
            &stub.config(),
        ));

        assert!(text.starts_with(
            "Earnings Calendar (2024-03-01 to 2024-03-31):\n\n\
             1. SYM0\n\
             \x20  Date: 2024-03-07\n\
             \x20  EPS Estimate: $1.25\n\
             \x20  Hour: amc\n\n"
        ));
        assert!(text.contains("20. SYM19\n"));
        assert!(!text.contains("SYM20"));

        let query = stub.query_for("/finnhub/v1/calendar/earnings");
        assert_eq!(param(&query, "from"), Some("2024-03-01"));
        assert_eq!(param(&query, "to"), Some("2024-03-31"));
        assert_token(&stub, "/finnhub/v1/calendar/earnings");
    }

    #[test]
    fn test_calendar_not_found() {
        let stub = finnhub_stub("/finnhub/v1/calendar/earnings", json!({}));
        let text = render_text(FinnhubEarningsCalendarTool::report(
            &params(Some("2024-03-01"), Some("2024-03-02")),
            &stub.config(),
        ));
        assert_eq!(text, "No earnings calendar found for 2024-03-01 to 2024-03-02");
    }

    #[test]
    fn test_null_body_is_not_found() {
        let stub = finnhub_stub("/finnhub/v1/calendar/earnings", json!(null));
        let text = render_text(FinnhubEarningsCalendarTool::report(
            &params(Some("2024-03-01"), Some("2024-03-02")),
            &stub.config(),
        ));
        assert_eq!(text, "No earnings calendar found for 2024-03-01 to 2024-03-02");
    }

    #[test]
    fn test_failures() {
        let text = render_text(FinnhubEarningsCalendarTool::report(
            &params(None, None),
            &refused_config(),
        ));
        assert!(text.starts_with("Failed to get earnings calendar: "));

        let text = render_text(FinnhubEarningsCalendarTool::report(
            &params(None, None),
            &keyless_config(),
        ));
        assert!(text.starts_with("Error: Finnhub API key is not configured"));
    }
}
