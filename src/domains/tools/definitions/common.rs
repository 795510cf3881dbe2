//! Report plumbing shared by every tool.
//!
//! Tools produce a [`ReportResult`] internally and only turn it into text at
//! the MCP boundary, so a failure is always a single human-readable string.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

/// Placeholder for fields the upstream API did not return.
pub const NA: &str = "N/A";

/// Timeout for the IP lookups (ipify, ip-api).
pub const IP_LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Timeout for every other upstream request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Errors
// ============================================================================

/// A failed upstream request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, timeout or non-2xx status.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The body was not the JSON we expected.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// The error message followed by its source chain.
    ///
    /// reqwest keeps the interesting part ("Connection refused", "operation
    /// timed out") in the sources, not in its own message.
    pub fn details(&self) -> String {
        let mut details = self.to_string();
        let mut source = StdError::source(self);
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !details.contains(&cause_text) {
                details.push_str(": ");
                details.push_str(&cause_text);
            }
            source = cause.source();
        }
        details
    }
}

/// Why a tool could not produce its report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Missing configuration; no request was made.
    #[error("Error: {0}")]
    Config(String),

    /// The upstream call failed or returned something unusable.
    #[error("{context}: {details}")]
    Failed {
        context: &'static str,
        details: String,
    },

    /// The upstream call succeeded but had nothing to report.
    #[error("{0}")]
    NotFound(String),
}

impl ReportError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn failed(context: &'static str, error: &FetchError) -> Self {
        Self::Failed {
            context,
            details: error.details(),
        }
    }
}

/// Outcome of a tool: the report text or the reason there is none.
pub type ReportResult = Result<String, ReportError>;

/// Attach a tool's failure prefix to a fetch result.
pub trait FetchContext<T> {
    fn context(self, context: &'static str) -> Result<T, ReportError>;
}

impl<T> FetchContext<T> for Result<T, FetchError> {
    fn context(self, context: &'static str) -> Result<T, ReportError> {
        self.map_err(|e| ReportError::failed(context, &e))
    }
}

// ============================================================================
// Boundary conversions
// ============================================================================

/// Flatten a report into the single string handed back to the caller.
pub fn render_text(result: ReportResult) -> String {
    match result {
        Ok(text) => text,
        Err(e) => e.to_string(),
    }
}

/// Convert a report into an MCP tool result.
///
/// Failures keep their text and are flagged with `is_error`.
pub fn to_call_result(tool: &str, result: ReportResult) -> CallToolResult {
    match result {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            let message = e.to_string();
            warn!(tool, "{}", message);
            CallToolResult::error(vec![Content::text(message)])
        }
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// GET `url` with the given query and decode the JSON body.
///
/// One attempt, bounded by `timeout_secs`. Non-2xx statuses are errors.
pub fn fetch_json<T, Q>(url: &str, query: &Q, timeout_secs: u64) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    debug!(url, timeout_secs, "GET");

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;

    let response = client.get(url).query(query).send()?.error_for_status()?;
    let bytes = response.bytes()?;

    serde_json::from_slice(&bytes).map_err(|e| FetchError::InvalidResponse(e.to_string()))
}

// ============================================================================
// Field rendering
// ============================================================================

/// A JSON scalar as it appears in a report.
///
/// Numbers keep their JSON spelling (`15.0` stays `15.0`), strings are shown
/// without quotes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
    Bool(bool),
}

impl Scalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Bool(_) => None,
        }
    }

    /// Integral value; `3.0` counts, `3.5` does not.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Bool(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Render a value or the `N/A` placeholder.
pub fn or_na<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| NA.to_string(), |v| v.to_string())
}

/// Render entry `i` of a column; short columns and nulls become `N/A`.
pub fn column<T: fmt::Display>(values: &[Option<T>], i: usize) -> String {
    or_na(values.get(i).and_then(Option::as_ref))
}

// ============================================================================
// Test support
// ============================================================================


#[cfg(test)]
mod tests {
    use super::stub::{Route, StubServer, refused_config};
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_report_error_rendering() {
        let config = ReportError::Config("missing key".to_string());
        assert_eq!(config.to_string(), "Error: missing key");

        let failed = ReportError::Failed {
            context: "Failed to retrieve data",
            details: "boom".to_string(),
        };
        assert_eq!(render_text(Err(failed)), "Failed to retrieve data: boom");

        assert_eq!(render_text(Err(ReportError::not_found("nothing"))), "nothing");
        assert_eq!(render_text(Ok("fine".to_string())), "fine");
    }

    #[test]
    fn test_call_result_flags_failures() {
        let ok = to_call_result("t", Ok("report".to_string()));
        assert_ne!(ok.is_error, Some(true));

        let err = to_call_result("t", Err(ReportError::not_found("none")));
        assert_eq!(err.is_error, Some(true));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(or_na(None::<i32>), "N/A");
        assert_eq!(or_na(Some(3)), "3");

        let col = vec![Some(1.5), None];
        assert_eq!(column(&col, 0), "1.5");
        assert_eq!(column(&col, 1), "N/A");
        assert_eq!(column(&col, 9), "N/A");
    }

    #[test]
    fn test_scalar_keeps_json_spelling() {
        let values: Vec<Scalar> = serde_json::from_value(json!([15.0, 7, "AAPL", true])).unwrap();
        let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["15.0", "7", "AAPL", "true"]);
        assert_eq!(values[0].as_f64(), Some(15.0));
        assert_eq!(values[1].as_i64(), Some(7));
        assert_eq!(values[0].as_i64(), Some(15));

        let fractional: Scalar = serde_json::from_value(json!(3.5)).unwrap();
        assert_eq!(fractional.as_i64(), None);
    }

    #[test]
    fn test_fetch_json_sends_query() {
        let stub = StubServer::start(vec![Route::json("/thing", json!({ "ok": true }))]);
        let url = format!("{}/thing", stub.base);

        let value: Value = fetch_json(&url, &[("a", "1"), ("b", "x y")], 5).unwrap();
        assert_eq!(value, json!({ "ok": true }));

        let query = stub.query_for("/thing");
        assert_eq!(stub::param(&query, "b"), Some("x y"));
    }

    #[test]
    fn test_fetch_json_status_error() {
        let stub = StubServer::start(vec![Route::status("/down", 503)]);
        let url = format!("{}/down", stub.base);

        let err = fetch_json::<Value, _>(&url, &[("a", "1")], 5).unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
        assert!(err.details().contains("503"));
    }

    #[test]
    fn test_fetch_json_invalid_body() {
        let stub = StubServer::start(vec![Route::raw("/html", "<html>")]);
        let url = format!("{}/html", stub.base);

        let err = fetch_json::<Value, _>(&url, &[("a", "1")], 5).unwrap_err();
        assert!(matches!(err, FetchError::InvalidResponse(_)));
    }

    #[test]
    fn test_fetch_json_connection_refused() {
        let config = refused_config();
        let err = fetch_json::<Value, _>(&config.endpoints.finnhub_url, &[("a", "1")], 5)
            .unwrap_err();
        assert!(err.details().contains("error sending request"));
    }
}
