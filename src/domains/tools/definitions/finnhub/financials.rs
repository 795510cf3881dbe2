//! Fundamentals: key metrics, filed reports, analyst recommendations and
//! earnings surprises.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::super::{ToolDefinition, common::{ReportError, ReportResult}};
use super::{FinnhubClient, Record, SymbolParams, array, field, field_or, finish, push_item, records};
use crate::core::config::Config;

// ============================================================================
// Basic financials
// ============================================================================

/// Metrics shown by the basic financials report, in display order.
pub const KEY_METRICS: [(&str, &str); 10] = [
    ("52 Week High", "52WeekHigh"),
    ("52 Week Low", "52WeekLow"),
    ("P/E Ratio", "peBasicExclExtraTTM"),
    ("EPS", "epsBasicExclExtraItemsTTM"),
    ("P/B Ratio", "pbQuarterly"),
    ("Return on Assets (ROA)", "roaTTM"),
    ("Return on Equity (ROE)", "roeTTM"),
    ("Dividend Yield", "dividendYieldIndicatedAnnual"),
    ("Beta", "beta"),
    ("Market Cap", "marketCapitalization"),
];

fn default_metric() -> String {
    "all".to_string()
}

/// Parameters for the basic financials tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FinnhubBasicFinancialsParams {
    #[schemars(description = "Stock symbol, e.g. AAPL")]
    pub symbol: String,

    #[schemars(description = "Metric group (default: all)")]
    #[serde(default = "default_metric")]
    pub metric: String,
}

/// Finnhub basic financials tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubBasicFinancialsTool;

impl ToolDefinition for FinnhubBasicFinancialsTool {
    const NAME: &'static str = "finnhub_basic_financials";

    const DESCRIPTION: &'static str = "Get key financial metrics of a company from Finnhub: \
        52-week high/low, P/E, EPS, P/B, ROA, ROE, dividend yield, beta and market cap.";

    type Params = FinnhubBasicFinancialsParams;

    #[instrument(name = "finnhub_basic_financials", skip(config))]
    fn report(params: &FinnhubBasicFinancialsParams, config: &Config) -> ReportResult {
        const FAILURE: &str = "Failed to get basic financials";

        let client = FinnhubClient::from_config(config)?;
        let symbol = params.symbol.as_str();

        let data: Record = client.get(
            "/stock/metric",
            &[("symbol", symbol), ("metric", params.metric.as_str())],
            FAILURE,
        )?;

        let Some(metrics) = data.get("metric").and_then(Value::as_object) else {
            return Err(ReportError::not_found(format!(
                "No basic financials found for {symbol}"
            )));
        };

        let mut out = format!("{symbol} Basic Financials:\n\n");
        for (label, key) in KEY_METRICS {
            if metrics.get(key).is_some_and(|v| !v.is_null()) {
                out.push_str(&format!("{label}: {}\n", field(metrics, key)));
            }
        }
        Ok(finish(out))
    }
}

// ============================================================================
// Financials as reported
// ============================================================================

/// Number of filed reports listed.
pub const REPORTS_LIMIT: usize = 3;

fn default_freq() -> String {
    "annual".to_string()
}

/// Parameters for the financials-as-reported tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FinnhubFinancialsReportedParams {
    #[schemars(description = "Stock symbol, e.g. AAPL")]
    pub symbol: String,

    #[schemars(description = "Reporting frequency: 'annual' (default) or 'quarterly'")]
    #[serde(default = "default_freq")]
    pub freq: String,
}

/// Finnhub financials-as-reported tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubFinancialsReportedTool;

impl ToolDefinition for FinnhubFinancialsReportedTool {
    const NAME: &'static str = "finnhub_financials_reported";

    const DESCRIPTION: &'static str = "List the most recent financial statements filed by a \
        company (period, filed date, accepted date, form type) from Finnhub.";

    type Params = FinnhubFinancialsReportedParams;

    #[instrument(name = "finnhub_financials_reported", skip(config))]
    fn report(params: &FinnhubFinancialsReportedParams, config: &Config) -> ReportResult {
        const FAILURE: &str = "Failed to get financial reports";

        let client = FinnhubClient::from_config(config)?;
        let symbol = params.symbol.as_str();
        let freq = params.freq.as_str();

        let data: Record = client.get(
            "/stock/financials-reported",
            &[("symbol", symbol), ("freq", freq)],
            FAILURE,
        )?;

        let Some(reports) = array(&data, "data") else {
            return Err(ReportError::not_found(format!(
                "No financial reports found for {symbol}"
            )));
        };

        let mut out = format!("{symbol} Financial Reports ({freq}):\n\n");
        for (i, report) in records(reports, REPORTS_LIMIT).enumerate() {
            let period = format!(
                "{}-Q{}",
                field(report, "year"),
                field_or(report, "quarter", "")
            );
            push_item(
                &mut out,
                i + 1,
                &format!("Period: {period}"),
                &[
                    ("Filed Date", field(report, "filedDate")),
                    ("Accepted Date", field(report, "acceptedDate")),
                    ("Form", field(report, "form")),
                ],
            );
        }
        Ok(finish(out))
    }
}

// ============================================================================
// Recommendation trends
// ============================================================================

/// Number of monthly recommendation snapshots listed.
pub const RECOMMENDATIONS_LIMIT: usize = 3;

/// Finnhub recommendation trends tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubRecommendationTrendsTool;

impl ToolDefinition for FinnhubRecommendationTrendsTool {
    const NAME: &'static str = "finnhub_recommendation_trends";

    const DESCRIPTION: &'static str = "Get analyst recommendation trends for a company from \
        Finnhub (strong buy, buy, hold, sell, strong sell counts) for the latest periods.";

    type Params = SymbolParams;

    #[instrument(name = "finnhub_recommendation_trends", skip(config))]
    fn report(params: &SymbolParams, config: &Config) -> ReportResult {
        const FAILURE: &str = "Failed to get recommendation trends";

        let client = FinnhubClient::from_config(config)?;
        let symbol = params.symbol.as_str();

        let trends: Vec<Value> =
            client.get("/stock/recommendation", &[("symbol", symbol)], FAILURE)?;
        if trends.is_empty() {
            return Err(ReportError::not_found(format!(
                "No recommendation trends found for {symbol}"
            )));
        }

        let mut out = format!("{symbol} Analyst Recommendation Trends:\n\n");
        for (i, rec) in records(&trends, RECOMMENDATIONS_LIMIT).enumerate() {
            push_item(
                &mut out,
                i + 1,
                &format!("Period: {}", field(rec, "period")),
                &[
                    ("Strong Buy", field_or(rec, "strongBuy", "0")),
                    ("Buy", field_or(rec, "buy", "0")),
                    ("Hold", field_or(rec, "hold", "0")),
                    ("Sell", field_or(rec, "sell", "0")),
                    ("Strong Sell", field_or(rec, "strongSell", "0")),
                ],
            );
        }
        Ok(finish(out))
    }
}

// ============================================================================
// Earnings surprises
// ============================================================================

/// Number of quarters listed.
pub const EARNINGS_LIMIT: usize = 5;

/// Finnhub earnings surprises tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubEarningsSurprisesTool;

impl ToolDefinition for FinnhubEarningsSurprisesTool {
    const NAME: &'static str = "finnhub_earnings_surprises";

    const DESCRIPTION: &'static str = "Get historical quarterly earnings surprises of a company \
        from Finnhub: actual vs. estimated EPS, surprise and surprise percent.";

    type Params = SymbolParams;

    #[instrument(name = "finnhub_earnings_surprises", skip(config))]
    fn report(params: &SymbolParams, config: &Config) -> ReportResult {
        const FAILURE: &str = "Failed to get earnings surprises";

        let client = FinnhubClient::from_config(config)?;
        let symbol = params.symbol.as_str();

        let earnings: Vec<Value> = client.get("/stock/earnings", &[("symbol", symbol)], FAILURE)?;
        if earnings.is_empty() {
            return Err(ReportError::not_found(format!(
                "No earnings data found for {symbol}"
            )));
        }

        let mut out = format!("{symbol} Earnings Surprises:\n\n");
        for (i, quarter) in records(&earnings, EARNINGS_LIMIT).enumerate() {
            push_item(
                &mut out,
                i + 1,
                &format!("Period: {}", field(quarter, "period")),
                &[
                    ("Actual EPS", format!("${}", field(quarter, "actual"))),
                    ("Estimated EPS", format!("${}", field(quarter, "estimate"))),
                    ("Surprise", format!("${}", field(quarter, "surprise"))),
                    ("Surprise Percent", format!("{}%", field(quarter, "surprisePercent"))),
                ],
            );
        }
        Ok(finish(out))
    }
}
