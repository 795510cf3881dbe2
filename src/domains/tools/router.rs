//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route via `create_route`.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;

use super::definitions::{
    FinnhubBasicFinancialsTool, FinnhubCompanyNewsTool, FinnhubCompanyPeersTool,
    FinnhubCompanyProfileTool, FinnhubEarningsCalendarTool, FinnhubEarningsSurprisesTool,
    FinnhubFinancialsReportedTool, FinnhubInsiderSentimentTool, FinnhubInsiderTransactionsTool,
    FinnhubMarketNewsTool, FinnhubRecommendationTrendsTool, FinnhubSearchSymbolTool,
    FinnhubStockQuoteTool, TimeAndLocationTool, TimeByIpTool, WeatherCurrentTool,
    WeatherDailyForecastTool, WeatherHourlyForecastTool, create_route,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(create_route::<TimeByIpTool, S>(config.clone()))
        .with_route(create_route::<TimeAndLocationTool, S>(config.clone()))
        .with_route(create_route::<WeatherCurrentTool, S>(config.clone()))
        .with_route(create_route::<WeatherDailyForecastTool, S>(config.clone()))
        .with_route(create_route::<WeatherHourlyForecastTool, S>(config.clone()))
        .with_route(create_route::<FinnhubStockQuoteTool, S>(config.clone()))
        .with_route(create_route::<FinnhubCompanyProfileTool, S>(config.clone()))
        .with_route(create_route::<FinnhubCompanyPeersTool, S>(config.clone()))
        .with_route(create_route::<FinnhubBasicFinancialsTool, S>(config.clone()))
        .with_route(create_route::<FinnhubInsiderTransactionsTool, S>(config.clone()))
        .with_route(create_route::<FinnhubInsiderSentimentTool, S>(config.clone()))
        .with_route(create_route::<FinnhubFinancialsReportedTool, S>(config.clone()))
        .with_route(create_route::<FinnhubRecommendationTrendsTool, S>(config.clone()))
        .with_route(create_route::<FinnhubEarningsSurprisesTool, S>(config.clone()))
        .with_route(create_route::<FinnhubEarningsCalendarTool, S>(config.clone()))
        .with_route(create_route::<FinnhubMarketNewsTool, S>(config.clone()))
        .with_route(create_route::<FinnhubCompanyNewsTool, S>(config.clone()))
        .with_route(create_route::<FinnhubSearchSymbolTool, S>(config))
}
