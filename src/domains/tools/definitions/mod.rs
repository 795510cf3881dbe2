//! Tool definitions module.
//!
//! Tools are grouped by the upstream API they wrap. Each tool is a unit
//! struct implementing [`ToolDefinition`]; the generic helpers below turn it
//! into MCP metadata, an rmcp route or an HTTP dispatch target.

pub mod common;
pub mod finnhub;
pub mod lookup;
pub mod time;
pub mod weather;

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::info;

use crate::core::config::Config;
use common::{ReportResult, to_call_result};

pub use finnhub::{
    FinnhubBasicFinancialsTool, FinnhubCompanyNewsTool, FinnhubCompanyPeersTool,
    FinnhubCompanyProfileTool, FinnhubEarningsCalendarTool, FinnhubEarningsSurprisesTool,
    FinnhubFinancialsReportedTool, FinnhubInsiderSentimentTool, FinnhubInsiderTransactionsTool,
    FinnhubMarketNewsTool, FinnhubRecommendationTrendsTool, FinnhubSearchSymbolTool,
    FinnhubStockQuoteTool,
};
pub use time::{TimeAndLocationTool, TimeByIpTool};
pub use weather::{WeatherCurrentTool, WeatherDailyForecastTool, WeatherHourlyForecastTool};

/// A tool that turns typed parameters into a text report.
pub trait ToolDefinition: 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Call arguments; the JSON schema is advertised to clients.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Run the tool. Blocks on upstream HTTP requests.
    fn report(params: &Self::Params, config: &Config) -> ReportResult;
}

/// Parameters for tools that take no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Create a Tool model for `T` (metadata).
pub fn to_tool<T: ToolDefinition>() -> Tool {
    Tool {
        name: T::NAME.into(),
        description: Some(T::DESCRIPTION.into()),
        input_schema: cached_schema_for_type::<T::Params>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Execute `T` and convert the report into a tool result.
pub fn execute<T: ToolDefinition>(params: &T::Params, config: &Config) -> CallToolResult {
    info!(tool = T::NAME, "Executing tool");
    to_call_result(T::NAME, T::report(params, config))
}

/// Create a ToolRoute for the STDIO transport.
///
/// Malformed arguments are rejected as `invalid_params` before the tool runs.
pub fn create_route<T, S>(config: Arc<Config>) -> ToolRoute<S>
where
    T: ToolDefinition,
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(to_tool::<T>(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let config = config.clone();
        async move {
            let params: T::Params = serde_json::from_value(serde_json::Value::Object(args))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

            let result = tokio::task::spawn_blocking(move || execute::<T>(&params, &config))
                .await
                .map_err(|e| {
                    McpError::internal_error(format!("Task execution failed: {}", e), None)
                })?;

            Ok(result)
        }
        .boxed()
    })
}

/// HTTP handler for `T` (for HTTP transport).
///
/// Blocks; the caller runs it off the async executor.
#[cfg(feature = "http")]
pub fn http_handler<T: ToolDefinition>(
    arguments: serde_json::Value,
    config: &Config,
) -> Result<serde_json::Value, super::ToolError> {
    let arguments = match arguments {
        serde_json::Value::Null => serde_json::json!({}),
        other => other,
    };
    let params: T::Params = serde_json::from_value(arguments)
        .map_err(|e| super::ToolError::invalid_arguments(e.to_string()))?;

    let result = execute::<T>(&params, config);

    Ok(serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    }))
}
