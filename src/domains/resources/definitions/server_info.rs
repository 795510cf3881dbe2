//! Server info resource definition.

use serde_json::json;

use super::ResourceDefinition;
use crate::core::config::Config;
use crate::domains::resources::{error::ResourceError, service::ResourceContent};
use crate::domains::tools::ToolRegistry;

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "mcp://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str =
        "Server identity, available tools, upstream endpoints and credential status";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::ServerInfo
    }
}

/// Render the server description. The API key itself is never included.
pub fn render(config: &Config) -> Result<String, ResourceError> {
    let info = json!({
        "name": config.server.name,
        "version": config.server.version,
        "tools": ToolRegistry::tool_names(),
        "finnhub_api_key_configured": config.credentials.finnhub_key().is_some(),
        "endpoints": config.endpoints,
    });

    serde_json::to_string_pretty(&info).map_err(|e| ResourceError::internal(e.to_string()))
}
