//! STDIO transport implementation.
//!
//! stdout carries the MCP protocol, so all logging goes to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve a single client over stdin/stdout until it disconnects.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let running = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(TransportError::session)?;

        running
            .waiting()
            .await
            .map_err(TransportError::serve)?;

        info!("STDIO client disconnected");
        Ok(())
    }
}
