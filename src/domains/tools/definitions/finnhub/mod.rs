//! Stock market tools backed by the Finnhub REST API.
//!
//! Every request carries the configured API token. Without a token the tools
//! answer with a configuration error and never touch the network.

mod calendar;
mod company;
mod financials;
mod insider;
mod news;
mod quote;
mod search;

pub use calendar::{FinnhubEarningsCalendarParams, FinnhubEarningsCalendarTool};
pub use company::{FinnhubCompanyPeersTool, FinnhubCompanyProfileTool};
pub use financials::{
    FinnhubBasicFinancialsParams, FinnhubBasicFinancialsTool, FinnhubEarningsSurprisesTool,
    FinnhubFinancialsReportedParams, FinnhubFinancialsReportedTool,
    FinnhubRecommendationTrendsTool,
};
pub use insider::{
    FinnhubInsiderSentimentParams, FinnhubInsiderSentimentTool, FinnhubInsiderTransactionsTool,
};
pub use news::{
    FinnhubCompanyNewsParams, FinnhubCompanyNewsTool, FinnhubMarketNewsParams,
    FinnhubMarketNewsTool,
};
pub use quote::FinnhubStockQuoteTool;
pub use search::{FinnhubSearchSymbolParams, FinnhubSearchSymbolTool};

use schemars::JsonSchema;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use super::common::{DEFAULT_TIMEOUT_SECS, FetchContext, NA, ReportError, fetch_json};
use crate::core::config::Config;

/// A JSON object as returned by Finnhub.
pub type Record = serde_json::Map<String, Value>;

/// Parameters for tools keyed by a single ticker symbol.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SymbolParams {
    #[schemars(description = "Stock symbol, e.g. AAPL, TSLA or BINANCE:BTCUSDT")]
    pub symbol: String,
}

// ============================================================================
// Client
// ============================================================================

/// Authenticated access to the Finnhub API for one tool call.
pub struct FinnhubClient<'a> {
    base_url: &'a str,
    token: &'a str,
}

impl<'a> FinnhubClient<'a> {
    /// Build a client, or fail with a configuration error when no key is set.
    pub fn from_config(config: &'a Config) -> Result<Self, ReportError> {
        let token = config.credentials.finnhub_key().ok_or_else(|| {
            ReportError::Config(
                "Finnhub API key is not configured (set MCP_FINNHUB_API_KEY)".to_string(),
            )
        })?;

        Ok(Self {
            base_url: config.endpoints.finnhub_url.trim_end_matches('/'),
            token,
        })
    }

    /// GET `path` with `query` plus the token; failures carry `context`.
    ///
    /// A `null` body decodes to the empty payload, so callers treat it like
    /// any other empty answer.
    pub fn get<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        context: &'static str,
    ) -> Result<T, ReportError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(path, "Finnhub request");

        let mut params = query.to_vec();
        params.push(("token", self.token));

        let body: Option<T> = fetch_json(&url, &params, DEFAULT_TIMEOUT_SECS).context(context)?;
        Ok(body.unwrap_or_default())
    }
}

// ============================================================================
// Rendering helpers
// ============================================================================

/// Render a scalar field; absent and null fields become `default`.
pub fn field_or(record: &Record, key: &str, default: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Render a scalar field or `N/A`.
pub fn field(record: &Record, key: &str) -> String {
    field_or(record, key, NA)
}

/// Append one numbered list item: a title line and indented detail lines.
pub fn push_item(out: &mut String, index: usize, title: &str, details: &[(&str, String)]) {
    out.push_str(&format!("{index}. {title}\n"));
    for (label, value) in details {
        out.push_str(&format!("   {label}: {value}\n"));
    }
    out.push('\n');
}

/// The `key` array of a response object, if present.
pub fn array<'r>(data: &'r Record, key: &str) -> Option<&'r Vec<Value>> {
    data.get(key).and_then(Value::as_array)
}

/// Objects among the first `limit` entries of a list.
pub fn records(items: &[Value], limit: usize) -> impl Iterator<Item = &Record> {
    items.iter().take(limit).filter_map(Value::as_object)
}

/// Final report text: surrounding whitespace removed.
pub fn finish(out: String) -> String {
    out.trim().to_string()
}
