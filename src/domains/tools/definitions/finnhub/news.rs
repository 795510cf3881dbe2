//! Market-wide and company-specific news.

use chrono::{Local, TimeDelta, TimeZone};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::super::{ToolDefinition, common::{NA, ReportError, ReportResult}};
use super::{FinnhubClient, Record, field, field_or, finish, push_item, records};
use crate::core::config::Config;

/// Summaries are cut to this many characters.
pub const SUMMARY_CHARS: usize = 200;

/// Number of company news items listed.
pub const COMPANY_NEWS_LIMIT: usize = 5;

/// First `SUMMARY_CHARS` characters of the summary, followed by `...`.
fn summary(item: &Record) -> String {
    let text: String = field(item, "summary").chars().take(SUMMARY_CHARS).collect();
    format!("{text}...")
}

/// Append one news item followed by a `---` separator.
fn push_news(out: &mut String, index: usize, item: &Record, date: String) {
    push_item(
        out,
        index,
        &field(item, "headline"),
        &[
            ("Date", date),
            ("Source", field(item, "source")),
            ("Summary", summary(item)),
            ("URL", field_or(item, "url", "#")),
        ],
    );
    out.push_str("---\n\n");
}

// ============================================================================
// Market news
// ============================================================================

fn default_category() -> String {
    "general".to_string()
}

fn default_limit() -> i64 {
    5
}

/// Parameters for the market news tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FinnhubMarketNewsParams {
    #[schemars(description = "News category: general (default), forex, crypto or merger")]
    #[serde(default = "default_category")]
    pub category: String,

    #[schemars(description = "Number of news items to return (default: 5)")]
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Finnhub market news tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubMarketNewsTool;

impl ToolDefinition for FinnhubMarketNewsTool {
    const NAME: &'static str = "finnhub_market_news";

    const DESCRIPTION: &'static str = "Get the latest market news from Finnhub for a category \
        (general, forex, crypto, merger): headline, date, source, summary and link.";

    type Params = FinnhubMarketNewsParams;

    #[instrument(name = "finnhub_market_news", skip(config))]
    fn report(params: &FinnhubMarketNewsParams, config: &Config) -> ReportResult {
        const FAILURE: &str = "Failed to get market news";

        let client = FinnhubClient::from_config(config)?;
        let category = params.category.as_str();

        let news: Vec<Value> = client.get("/news", &[("category", category)], FAILURE)?;
        if news.is_empty() {
            return Err(ReportError::not_found("No news found"));
        }

        let limit = usize::try_from(params.limit).unwrap_or(0);
        let mut out = format!("Market News ({}):\n\n", category.to_uppercase());
        for (i, item) in records(&news, limit).enumerate() {
            push_news(&mut out, i + 1, item, field(item, "datetime"));
        }
        Ok(finish(out))
    }
}

// ============================================================================
// Company news
// ============================================================================

fn default_days() -> i64 {
    7
}

/// Parameters for the company news tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FinnhubCompanyNewsParams {
    #[schemars(description = "Stock symbol, e.g. AAPL")]
    pub symbol: String,

    #[schemars(description = "How many days back to look (default: 7)")]
    #[serde(default = "default_days")]
    pub days: i64,
}

/// Local `YYYY-MM-DD HH:MM` for a Unix timestamp.
fn local_timestamp(seconds: i64) -> String {
    Local
        .timestamp_opt(seconds, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| NA.to_string())
}

/// Finnhub company news tool implementation.
#[derive(Debug, Clone)]
pub struct FinnhubCompanyNewsTool;

impl ToolDefinition for FinnhubCompanyNewsTool {
    const NAME: &'static str = "finnhub_company_news";

    const DESCRIPTION: &'static str = "Get recent news about a company from Finnhub (default: the \
        last 7 days): headline, date, source, summary and link for up to 5 articles.";

    type Params = FinnhubCompanyNewsParams;

    #[instrument(name = "finnhub_company_news", skip(config))]
    fn report(params: &FinnhubCompanyNewsParams, config: &Config) -> ReportResult {
        const FAILURE: &str = "Failed to get company news";

        let client = FinnhubClient::from_config(config)?;
        let symbol = params.symbol.as_str();
        let days = params.days;

        let today = Local::now().date_naive();
        let start = TimeDelta::try_days(days)
            .and_then(|back| today.checked_sub_signed(back))
            .ok_or_else(|| ReportError::Failed {
                context: FAILURE,
                details: format!("date value out of range: {days} days back"),
            })?;
        let (from, to) = (
            start.format("%Y-%m-%d").to_string(),
            today.format("%Y-%m-%d").to_string(),
        );

        let news: Vec<Value> = client.get(
            "/company-news",
            &[("symbol", symbol), ("from", from.as_str()), ("to", to.as_str())],
            FAILURE,
        )?;
        if news.is_empty() {
            return Err(ReportError::not_found(format!("No news found for {symbol}")));
        }

        let mut out = format!("{symbol} Company News (last {days} days):\n\n");
        for (i, item) in records(&news, COMPANY_NEWS_LIMIT).enumerate() {
            let seconds = item.get("datetime").and_then(Value::as_i64).unwrap_or(0);
            push_news(&mut out, i + 1, item, local_timestamp(seconds));
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

    fn article(i: usize) -> Value {
        json!({
            "category": "top news",
            "datetime": 1709650800 + i as i64 * 60,
            "headline": format!("Headline {i}"),
            "id": 7000 + i,
            "source": "Reuters",
            "summary": "x".repeat(250),
            "url": format!("https://example.com/{i}")
        })
    }

    fn market_params(limit: i64) -> FinnhubMarketNewsParams {
        FinnhubMarketNewsParams {
            category: "crypto".to_string(),
            limit,
        }
    }

    #[test]
    fn test_market_news_layout() {
        let stub = finnhub_stub("/finnhub/v1/news", json!([article(0), article(1)]));
        let text = render_text(FinnhubMarketNewsTool::report(&market_params(5), &stub.config()));

        let expected_first = format!(
            "Market News (CRYPTO):\n\n\
             1. Headline 0\n\
             \x20  Date: 1709650800\n\
             \x20  Source: Reuters\n\
             \x20  Summary: {}...\n\
             \x20  URL: https://example.com/0\n\n\
             ---\n\n\
             2. Headline 1\n",
            "x".repeat(200)
        );
        assert!(text.starts_with(&expected_first), "{text}");
        assert!(text.ends_with("---"));

        assert_eq!(param(&stub.query_for("/finnhub/v1/news"), "category"), Some("crypto"));
        assert_token(&stub, "/finnhub/v1/news");
    }

    #[test]
    fn test_market_news_respects_limit() {
        let articles: Vec<_> = (0..10).map(article).collect();
        let stub = finnhub_stub("/finnhub/v1/news", json!(articles));

        let text = render_text(FinnhubMarketNewsTool::report(&market_params(3), &stub.config()));
        assert_eq!(text.matches("---").count(), 3);
        assert!(text.contains("3. Headline 2\n"));
        assert!(!text.contains("Headline 3"));
    }

    #[test]
    fn test_market_news_defaults() {
        let params: FinnhubMarketNewsParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.category, "general");
        assert_eq!(params.limit, 5);
    }

    #[test]
    fn test_missing_url_and_summary() {
        let stub = finnhub_stub("/finnhub/v1/news", json!([{ "headline": "Bare" }]));
        let text = render_text(FinnhubMarketNewsTool::report(&market_params(5), &stub.config()));
        assert!(text.contains("   Summary: N/A...\n"));
        assert!(text.contains("   URL: #\n"));
        assert!(text.contains("   Date: N/A\n"));
    }

    #[test]
    fn test_market_news_not_found() {
        let stub = finnhub_stub("/finnhub/v1/news", json!([]));
        let text = render_text(FinnhubMarketNewsTool::report(&market_params(5), &stub.config()));
        assert_eq!(text, "No news found");
    }

    #[test]
    fn test_null_body_is_not_found() {
        let stub = finnhub_stub("/finnhub/v1/news", json!(null));
        let text = render_text(FinnhubMarketNewsTool::report(&market_params(5), &stub.config()));
        assert_eq!(text, "No news found");
    }

    #[test]
    fn test_company_news() {
        let articles: Vec<_> = (0..8).map(article).collect();
        let stub = finnhub_stub("/finnhub/v1/company-news", json!(articles));

        let params = FinnhubCompanyNewsParams {
            symbol: "AAPL".to_string(),
            days: 7,
        };
        let text = render_text(FinnhubCompanyNewsTool::report(&params, &stub.config()));

        assert!(text.starts_with("AAPL Company News (last 7 days):\n\n1. Headline 0\n"));
        assert!(text.contains(&format!("   Date: {}\n", local_timestamp(1709650800))));
        assert_eq!(text.matches("---").count(), 5);

        let query = stub.query_for("/finnhub/v1/company-news");
        let today = Local::now().date_naive();
        assert_eq!(param(&query, "symbol"), Some("AAPL"));
        assert_eq!(
            param(&query, "to"),
            Some(today.format("%Y-%m-%d").to_string().as_str())
        );
        assert_eq!(
            param(&query, "from"),
            Some((today - TimeDelta::days(7)).format("%Y-%m-%d").to_string().as_str())
        );
    }

    #[test]
    fn test_local_timestamp_format() {
        let rendered = local_timestamp(0);
        assert_eq!(rendered.len(), "1970-01-01 00:00".len());
        assert!(rendered.starts_with("1970-01-01") || rendered.starts_with("1969-12-31"));
    }

    #[test]
    fn test_failures() {
        let text = render_text(FinnhubMarketNewsTool::report(&market_params(5), &refused_config()));
        assert!(text.starts_with("Failed to get market news: "));
        assert!(text.contains("error sending request"));

        let params = FinnhubCompanyNewsParams {
            symbol: "AAPL".to_string(),
            days: 7,
        };
        let text = render_text(FinnhubCompanyNewsTool::report(&params, &refused_config()));
        assert!(text.starts_with("Failed to get company news: "));

        let text = render_text(FinnhubCompanyNewsTool::report(&params, &keyless_config()));
        assert!(text.starts_with("Error: Finnhub API key is not configured"));
    }
}
