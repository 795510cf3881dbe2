//! Insider transactions and insider sentiment.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::super::{ToolDefinition, common::{NA, ReportError, ReportResult}};
use super::{FinnhubClient, Record, SymbolParams, array, field, finish, push_item, records};
use crate::core::config::Config;

// ============================================================================
// Transactions
// ============================================================================

/// Number of transactions listed.
pub const TRANSACTIONS_LIMIT: usize = 10;

/// Finnhub insider transactions tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubInsiderTransactionsTool;

impl ToolDefinition for FinnhubInsiderTransactionsTool {
    const NAME: &'static str = "finnhub_insider_transactions";

    const DESCRIPTION: &'static str = "List the 10 most recent insider transactions of a company \
        from Finnhub: insider name, date, shares, price and transaction code.";

    type Params = SymbolParams;

    #[instrument(name = "finnhub_insider_transactions", skip(config))]
    fn report(params: &SymbolParams, config: &Config) -> ReportResult {
        const FAILURE: &str = "Failed to get insider transactions";

        let client = FinnhubClient::from_config(config)?;
        let symbol = params.symbol.as_str();

        let data: Record =
            client.get("/stock/insider-transactions", &[("symbol", symbol)], FAILURE)?;
        let Some(transactions) = array(&data, "data") else {
            return Err(ReportError::not_found(format!(
                "No insider transactions found for {symbol}"
            )));
        };

        let mut out = format!("{symbol} Insider Transactions (latest {TRANSACTIONS_LIMIT}):\n\n");
        for (i, txn) in records(transactions, TRANSACTIONS_LIMIT).enumerate() {
            push_item(
                &mut out,
                i + 1,
                &field(txn, "name"),
                &[
                    ("Date", field(txn, "transactionDate")),
                    ("Shares", field(txn, "share")),
                    ("Price", format!("${}", field(txn, "transactionPrice"))),
                    ("Code", field(txn, "transactionCode")),
                ],
            );
        }
        Ok(finish(out))
    }
}

// ============================================================================
// Sentiment
// ============================================================================

/// Number of monthly sentiment entries listed.
pub const SENTIMENT_LIMIT: usize = 5;

fn default_from_date() -> String {
    "2023-01-01".to_string()
}

fn default_to_date() -> String {
    "2024-12-31".to_string()
}

/// Parameters for the insider sentiment tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FinnhubInsiderSentimentParams {
    #[schemars(description = "Stock symbol, e.g. TSLA")]
    pub symbol: String,

    #[schemars(description = "Start date, YYYY-MM-DD (default: 2023-01-01)")]
    #[serde(default = "default_from_date")]
    pub from_date: String,

    #[schemars(description = "End date, YYYY-MM-DD (default: 2024-12-31)")]
    #[serde(default = "default_to_date")]
    pub to_date: String,
}

/// `YYYY-MM` period of a sentiment entry; the month is zero-padded.
fn sentiment_period(entry: &Record) -> String {
    let month = match entry.get("month").and_then(Value::as_i64) {
        Some(month) => format!("{month:02}"),
        None => NA.to_string(),
    };
    format!("{}-{month}", field(entry, "year"))
}

/// Finnhub insider sentiment tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubInsiderSentimentTool;

impl ToolDefinition for FinnhubInsiderSentimentTool {
    const NAME: &'static str = "finnhub_insider_sentiment";

    const DESCRIPTION: &'static str = "Get monthly insider sentiment of a company from Finnhub: \
        MSPR (monthly share purchase ratio) and net share change, for a date range.";

    type Params = FinnhubInsiderSentimentParams;

    #[instrument(name = "finnhub_insider_sentiment", skip(config))]
    fn report(params: &FinnhubInsiderSentimentParams, config: &Config) -> ReportResult {
        const FAILURE: &str = "Failed to get insider sentiment";

        let client = FinnhubClient::from_config(config)?;
        let symbol = params.symbol.as_str();
        let (from, to) = (params.from_date.as_str(), params.to_date.as_str());

        let data: Record = client.get(
            "/stock/insider-sentiment",
            &[("symbol", symbol), ("from", from), ("to", to)],
            FAILURE,
        )?;
        let Some(entries) = array(&data, "data") else {
            return Err(ReportError::not_found(format!(
                "No insider sentiment found for {symbol}"
            )));
        };

        let mut out = format!("{symbol} Insider Sentiment ({from} to {to}):\n\n");
        for (i, entry) in records(entries, SENTIMENT_LIMIT).enumerate() {
            push_item(
                &mut out,
                i + 1,
                &sentiment_period(entry),
                &[
                    ("MSPR (monthly share purchase ratio)", field(entry, "mspr")),
                    ("Change", field(entry, "change")),
                ],
            );
        }
        Ok(finish(out))
    }
}
