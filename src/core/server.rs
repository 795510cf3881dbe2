//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools and resources domains.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/`, grouped by upstream API.
//! Each tool implements `ToolDefinition` (name, description, parameters and a
//! `report()` producing the text result). The `ToolRouter` used by the STDIO
//! transport is built in `domains/tools/router.rs`; the HTTP transport
//! dispatches through `ToolRegistry`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::config::Config;
use crate::domains::{resources::ResourceService, tools::build_tool_router};

/// MCP handler shared by every transport. Cheap to clone.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,
    resources: Arc<ResourceService>,
    /// Routes used by the rmcp STDIO session.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Instructions advertised to clients on initialization.
    pub const INSTRUCTIONS: &'static str = "Tools for current time and location by IP, \
         Open-Meteo weather and air quality by coordinates, and Finnhub stock market data. \
         Every tool returns a plain-text report; failures are reported as text too. \
         Reference tables for weather codes and AQI levels are available as resources.";

    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let resources = Arc::new(ResourceService::new(config.clone()));
        let tool_router = build_tool_router::<Self>(config.clone());
        debug!(tools = tool_router.list_all().len(), "Tool routes registered");

        Self {
            tool_router,
            config,
            resources,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Tools perform blocking HTTP requests, so the call runs on the blocking
    /// thread pool.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> super::error::Result<serde_json::Value> {
        let registry = crate::domains::tools::ToolRegistry::new(self.config.clone());
        let name = name.to_string();

        let outcome = tokio::task::spawn_blocking(move || registry.call_tool(&name, arguments))
            .await
            .map_err(|e| super::error::Error::internal(format!("Tool task failed: {e}")))?;

        Ok(outcome?)
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        self.resources
            .list_resources()
            .await
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> super::error::Result<serde_json::Value> {
        let result = self.resources.read_resource(uri).await?;
        Ok(serde_json::json!({ "contents": result.contents }))
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(Self::INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resources.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resources
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}
