//! Symbol lookup by company name or ticker.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::super::{ToolDefinition, common::{ReportError, ReportResult}};
use super::{FinnhubClient, Record, array, field, finish, push_item, records};
use crate::core::config::Config;

/// Number of matches listed.
pub const SEARCH_LIMIT: usize = 10;

/// Parameters for the symbol search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FinnhubSearchSymbolParams {
    #[schemars(description = "Company name or ticker to search for, e.g. 'apple'")]
    pub query: String,
}

/// Finnhub symbol search tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubSearchSymbolTool;

impl ToolDefinition for FinnhubSearchSymbolTool {
    const NAME: &'static str = "finnhub_search_symbol";

    const DESCRIPTION: &'static str = "Search Finnhub for stock symbols matching a company name \
        or ticker. Returns up to 10 matches with description, symbol and security type.";

    type Params = FinnhubSearchSymbolParams;

    #[instrument(name = "finnhub_search_symbol", skip(config))]
    fn report(params: &FinnhubSearchSymbolParams, config: &Config) -> ReportResult {
        const FAILURE: &str = "Failed to search symbols";

        let client = FinnhubClient::from_config(config)?;
        let query = params.query.as_str();

        let data: Record = client.get("/search", &[("q", query)], FAILURE)?;
        let matches = match array(&data, "result") {
            Some(matches) if !matches.is_empty() => matches,
            _ => {
                return Err(ReportError::not_found(format!(
                    "No matching symbols found: {query}"
                )));
            }
        };

        let mut out = format!("Search results: {query}\n\n");
        for (i, item) in records(matches, SEARCH_LIMIT).enumerate() {
            push_item(
                &mut out,
                i + 1,
                &field(item, "description"),
                &[("Symbol", field(item, "symbol")), ("Type", field(item, "type"))],
            );
        }
        Ok(finish(out))
    }
}
