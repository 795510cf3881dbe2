//! Runs an [`McpServer`] on whichever transport the configuration selects.

use tracing::info;

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Serve until the client disconnects (STDIO) or the listener stops (HTTP).
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!(
            server = server.name(),
            "Starting transport: {}",
            self.config.description()
        );

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server).await,
            #[cfg(feature = "http")]
            TransportConfig::Http(http) => HttpTransport::new(http).run(server).await,
        }
    }
}
