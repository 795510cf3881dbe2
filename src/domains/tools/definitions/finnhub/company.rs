//! Company profile and peers.

use serde_json::Value;
use tracing::instrument;

use super::super::{ToolDefinition, common::{ReportError, ReportResult}};
use super::{FinnhubClient, Record, SymbolParams, field, finish};
use crate::core::config::Config;

// ============================================================================
// Profile
// ============================================================================

/// Finnhub company profile tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubCompanyProfileTool;

impl ToolDefinition for FinnhubCompanyProfileTool {
    const NAME: &'static str = "finnhub_company_profile";

    const DESCRIPTION: &'static str = "Get a company profile from Finnhub: name, industry, \
        website, country, exchange, ticker, market capitalization, IPO date, phone, shares \
        outstanding and logo.";

    type Params = SymbolParams;

    #[instrument(name = "finnhub_company_profile", skip(config))]
    fn report(params: &SymbolParams, config: &Config) -> ReportResult {
        const FAILURE: &str = "Failed to get company profile";

        let client = FinnhubClient::from_config(config)?;
        let symbol = params.symbol.as_str();

        let data: Record = client.get("/stock/profile2", &[("symbol", symbol)], FAILURE)?;
        if data.is_empty() {
            return Err(ReportError::not_found(format!(
                "No company profile found for: {symbol}"
            )));
        }

        Ok(finish(format!(
            "{} ({symbol})\n\n\
             Industry: {}\n\
             Website: {}\n\
             Country: {}\n\
             Exchange: {}\n\
             Ticker: {}\n\
             Market Cap: ${}M\n\
             IPO Date: {}\n\
             Phone: {}\n\
             Shares Outstanding: {}M\n\
             Logo: {}",
            field(&data, "name"),
            field(&data, "finnhubIndustry"),
            field(&data, "weburl"),
            field(&data, "country"),
            field(&data, "exchange"),
            field(&data, "ticker"),
            field(&data, "marketCapitalization"),
            field(&data, "ipo"),
            field(&data, "phone"),
            field(&data, "shareOutstanding"),
            field(&data, "logo"),
        )))
    }
}

// ============================================================================
// Peers
// ============================================================================

/// Finnhub company peers tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubCompanyPeersTool;

impl ToolDefinition for FinnhubCompanyPeersTool {
    const NAME: &'static str = "finnhub_company_peers";

    const DESCRIPTION: &'static str = "List the peers (competitors in the same industry) of a \
        company from Finnhub, as a comma-separated list of symbols.";

    type Params = SymbolParams;

    #[instrument(name = "finnhub_company_peers", skip(config))]
    fn report(params: &SymbolParams, config: &Config) -> ReportResult {
        const FAILURE: &str = "Failed to get company peers";

        let client = FinnhubClient::from_config(config)?;
        let symbol = params.symbol.as_str();

        let peers: Vec<Value> = client.get("/stock/peers", &[("symbol", symbol)], FAILURE)?;
        if peers.is_empty() {
            return Err(ReportError::not_found(format!("No peers found for {symbol}")));
        }

        let names: Vec<String> = peers
            .iter()
            .map(|peer| match peer {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();

        Ok(finish(format!("{symbol} peers:\n\n{}", names.join(", "))))
    }
}
