//! Real-time stock quote.

use serde_json::Value;
use tracing::instrument;

use super::super::{ToolDefinition, common::{ReportError, ReportResult}};
use super::{FinnhubClient, Record, SymbolParams, field, finish};
use crate::core::config::Config;

const FAILURE: &str = "Failed to get stock quote";

/// Finnhub stock quote tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubStockQuoteTool;

impl ToolDefinition for FinnhubStockQuoteTool {
    const NAME: &'static str = "finnhub_stock_quote";

    const DESCRIPTION: &'static str = "Get the real-time quote of a stock or crypto symbol from \
        Finnhub: current price, day high/low, open, previous close, change and percent change.";

    type Params = SymbolParams;

    #[instrument(name = "finnhub_stock_quote", skip(config))]
    fn report(params: &SymbolParams, config: &Config) -> ReportResult {
        let client = FinnhubClient::from_config(config)?;
        let symbol = params.symbol.as_str();

        let data: Record = client.get("/quote", &[("symbol", symbol)], FAILURE)?;

        // Finnhub answers unknown symbols with an all-zero quote.
        let price_is_zero = data.get("c").and_then(Value::as_f64) == Some(0.0);
        if data.is_empty() || price_is_zero {
            return Err(ReportError::not_found(format!(
                "No quote found for symbol: {symbol}"
            )));
        }

        Ok(finish(format!(
            "{symbol} Stock Quote\n\n\
             Current Price: ${}\n\
             High: ${}\n\
             Low: ${}\n\
             Open: ${}\n\
             Previous Close: ${}\n\
             Change: ${} ({}%)\n\
             Timestamp: {}",
            field(&data, "c"),
            field(&data, "h"),
            field(&data, "l"),
            field(&data, "o"),
            field(&data, "pc"),
            field(&data, "d"),
            field(&data, "dp"),
            field(&data, "t"),
        )))
    }
}
