//! HTTP transport implementation.
//!
//! Stateless JSON-RPC 2.0 over POST, so plain HTTP clients (curl, scripts,
//! browsers) can list and call the tools without an MCP session.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Build the axum router for this transport.
    pub fn router(&self, server: McpServer) -> Router {
        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(server);

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr,
            if self.config.enable_cors { "enabled" } else { "disabled" }
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(TransportError::serve)
    }
}

/// Root handler - provides API info.
async fn root_handler(State(server): State<McpServer>) -> impl IntoResponse {
    Json(json!({
        "name": server.name(),
        "version": server.version(),
        "transport": "HTTP",
        "protocol": "JSON-RPC 2.0",
        "endpoints": {
            "rpc": "POST with JSON-RPC messages",
            "health": "/health"
        }
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(server): State<McpServer>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", request.method.as_str());
    let response = dispatch(&server, request).await;
    (StatusCode::OK, Json(response))
}

/// Route a JSON-RPC request to the server.
async fn dispatch(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    let id = request.id;
    let params = request.params.unwrap_or_else(|| json!({}));

    match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {}, "resources": {} },
                "serverInfo": { "name": server.name(), "version": server.version() },
                "instructions": McpServer::INSTRUCTIONS
            }),
        ),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": server.list_tools() })),
        "tools/call" => {
            let Some(name) = params.get("name").and_then(Value::as_str) else {
                return JsonRpcResponse::invalid_params(id, "Missing tool name");
            };
            let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

            match server.call_tool(name, arguments).await {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => JsonRpcResponse::error(id, e.rpc_code(), e.to_string()),
            }
        }
        "resources/list" => JsonRpcResponse::success(
            id,
            json!({ "resources": server.list_resources().await }),
        ),
        "resources/read" => {
            let Some(uri) = params.get("uri").and_then(Value::as_str) else {
                return JsonRpcResponse::invalid_params(id, "Missing resource URI");
            };

            match server.read_resource(uri).await {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => JsonRpcResponse::error(id, e.rpc_code(), e.to_string()),
            }
        }
        method if method.starts_with("notifications/") => {
            info!("Received notification: {}", method);
            JsonRpcResponse::success(id, Value::Null)
        }
        method => {
            warn!("Unknown method: {}", method);
            JsonRpcResponse::method_not_found(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn test_tools_list_contains_every_tool() {
        let server = McpServer::new(Config::default());
        let response = dispatch(&server, request("tools/list", json!({}))).await;

        let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
        assert_eq!(tools, server.list_tools().len());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = McpServer::new(Config::default());
        let response = dispatch(&server, request("prompts/list", json!({}))).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version() {
        let server = McpServer::new(Config::default());
        let mut req = request("tools/list", json!({}));
        req.jsonrpc = "1.0".to_string();
        let response = dispatch(&server, req).await;
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_tools_call_without_name() {
        let server = McpServer::new(Config::default());
        let response = dispatch(&server, request("tools/call", json!({}))).await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_unknown_resource() {
        let server = McpServer::new(Config::default());
        let response = dispatch(
            &server,
            request("resources/read", json!({ "uri": "reference://nope" })),
        )
        .await;
        assert_eq!(response.error.unwrap().code, -32002);
    }

    #[tokio::test]
    async fn test_finnhub_call_without_key_is_a_text_result() {
        let server = McpServer::new(Config::default());
        let response = dispatch(
            &server,
            request(
                "tools/call",
                json!({ "name": "finnhub_stock_quote", "arguments": { "symbol": "AAPL" } }),
            ),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["isError"], json!(true));
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error: Finnhub API key is not configured"));
    }
}
