//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;

use rmcp::model::Tool;
#[cfg(feature = "http")]
use tracing::warn;

use crate::core::config::Config;

use super::definitions::{
    FinnhubBasicFinancialsTool, FinnhubCompanyNewsTool, FinnhubCompanyPeersTool,
    FinnhubCompanyProfileTool, FinnhubEarningsCalendarTool, FinnhubEarningsSurprisesTool,
    FinnhubFinancialsReportedTool, FinnhubInsiderSentimentTool, FinnhubInsiderTransactionsTool,
    FinnhubMarketNewsTool, FinnhubRecommendationTrendsTool, FinnhubSearchSymbolTool,
    FinnhubStockQuoteTool, TimeAndLocationTool, TimeByIpTool, ToolDefinition,
    WeatherCurrentTool, WeatherDailyForecastTool, WeatherHourlyForecastTool, to_tool,
};
#[cfg(feature = "http")]
use super::{ToolError, definitions::http_handler};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    config: Arc<Config>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            TimeByIpTool::NAME,
            TimeAndLocationTool::NAME,
            WeatherCurrentTool::NAME,
            WeatherDailyForecastTool::NAME,
            WeatherHourlyForecastTool::NAME,
            FinnhubStockQuoteTool::NAME,
            FinnhubCompanyProfileTool::NAME,
            FinnhubCompanyPeersTool::NAME,
            FinnhubBasicFinancialsTool::NAME,
            FinnhubInsiderTransactionsTool::NAME,
            FinnhubInsiderSentimentTool::NAME,
            FinnhubFinancialsReportedTool::NAME,
            FinnhubRecommendationTrendsTool::NAME,
            FinnhubEarningsSurprisesTool::NAME,
            FinnhubEarningsCalendarTool::NAME,
            FinnhubMarketNewsTool::NAME,
            FinnhubCompanyNewsTool::NAME,
            FinnhubSearchSymbolTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            to_tool::<TimeByIpTool>(),
            to_tool::<TimeAndLocationTool>(),
            to_tool::<WeatherCurrentTool>(),
            to_tool::<WeatherDailyForecastTool>(),
            to_tool::<WeatherHourlyForecastTool>(),
            to_tool::<FinnhubStockQuoteTool>(),
            to_tool::<FinnhubCompanyProfileTool>(),
            to_tool::<FinnhubCompanyPeersTool>(),
            to_tool::<FinnhubBasicFinancialsTool>(),
            to_tool::<FinnhubInsiderTransactionsTool>(),
            to_tool::<FinnhubInsiderSentimentTool>(),
            to_tool::<FinnhubFinancialsReportedTool>(),
            to_tool::<FinnhubRecommendationTrendsTool>(),
            to_tool::<FinnhubEarningsSurprisesTool>(),
            to_tool::<FinnhubEarningsCalendarTool>(),
            to_tool::<FinnhubMarketNewsTool>(),
            to_tool::<FinnhubCompanyNewsTool>(),
            to_tool::<FinnhubSearchSymbolTool>(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// Blocks on upstream requests; call it from a blocking context.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let config = self.config.as_ref();
        match name {
            TimeByIpTool::NAME => http_handler::<TimeByIpTool>(arguments, config),
            TimeAndLocationTool::NAME => http_handler::<TimeAndLocationTool>(arguments, config),
            WeatherCurrentTool::NAME => http_handler::<WeatherCurrentTool>(arguments, config),
            WeatherDailyForecastTool::NAME => {
                http_handler::<WeatherDailyForecastTool>(arguments, config)
            }
            WeatherHourlyForecastTool::NAME => {
                http_handler::<WeatherHourlyForecastTool>(arguments, config)
            }
            FinnhubStockQuoteTool::NAME => http_handler::<FinnhubStockQuoteTool>(arguments, config),
            FinnhubCompanyProfileTool::NAME => {
                http_handler::<FinnhubCompanyProfileTool>(arguments, config)
            }
            FinnhubCompanyPeersTool::NAME => {
                http_handler::<FinnhubCompanyPeersTool>(arguments, config)
            }
            FinnhubBasicFinancialsTool::NAME => {
                http_handler::<FinnhubBasicFinancialsTool>(arguments, config)
            }
            FinnhubInsiderTransactionsTool::NAME => {
                http_handler::<FinnhubInsiderTransactionsTool>(arguments, config)
            }
            FinnhubInsiderSentimentTool::NAME => {
                http_handler::<FinnhubInsiderSentimentTool>(arguments, config)
            }
            FinnhubFinancialsReportedTool::NAME => {
                http_handler::<FinnhubFinancialsReportedTool>(arguments, config)
            }
            FinnhubRecommendationTrendsTool::NAME => {
                http_handler::<FinnhubRecommendationTrendsTool>(arguments, config)
            }
            FinnhubEarningsSurprisesTool::NAME => {
                http_handler::<FinnhubEarningsSurprisesTool>(arguments, config)
            }
            FinnhubEarningsCalendarTool::NAME => {
                http_handler::<FinnhubEarningsCalendarTool>(arguments, config)
            }
            FinnhubMarketNewsTool::NAME => http_handler::<FinnhubMarketNewsTool>(arguments, config),
            FinnhubCompanyNewsTool::NAME => {
                http_handler::<FinnhubCompanyNewsTool>(arguments, config)
            }
            FinnhubSearchSymbolTool::NAME => {
                http_handler::<FinnhubSearchSymbolTool>(arguments, config)
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names.len(), 18);
        assert!(names.contains(&"time_by_ip"));
        assert!(names.contains(&"time_and_location"));
        assert!(names.contains(&"weather_current"));
        assert!(names.contains(&"weather_daily_forecast"));
        assert!(names.contains(&"weather_hourly_forecast"));
        assert!(names.contains(&"finnhub_stock_quote"));
        assert!(names.contains(&"finnhub_search_symbol"));
        assert_eq!(names.iter().filter(|n| n.starts_with("finnhub_")).count(), 13);
    }

    #[test]
    fn test_metadata_matches_names() {
        let tools = ToolRegistry::get_all_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, ToolRegistry::tool_names());
        assert!(tools.iter().all(|t| t.description.is_some()));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(Arc::new(Config::default()));
        let result = registry.call_tool("unknown", serde_json::json!({}));
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_bad_arguments() {
        let registry = ToolRegistry::new(Arc::new(Config::default()));
        let result = registry.call_tool("weather_current", serde_json::json!({ "latitude": "x" }));
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_without_key() {
        let registry = ToolRegistry::new(Arc::new(Config::default()));
        let result = registry
            .call_tool("finnhub_company_peers", serde_json::json!({ "symbol": "AAPL" }))
            .unwrap();
        assert_eq!(result["isError"], serde_json::json!(true));
    }
}
