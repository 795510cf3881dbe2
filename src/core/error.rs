//! Error types and handling for the MCP server.
//!
//! Tool *reports* never surface here: a failed upstream call is rendered into
//! the tool's text result. These errors cover protocol-level failures only:
//! unknown tools, malformed arguments, unknown resources and startup problems.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Protocol-level failure, tagged with the domain it came from.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    #[error("Resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    /// Rejected at startup by `Config::validate`.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A blocking tool task panicked or was cancelled.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// JSON-RPC error code for this failure.
    pub fn rpc_code(&self) -> i32 {
        match self {
            Self::Tool(_) => -32602,
            Self::Resource(crate::domains::resources::ResourceError::NotFound(_)) => -32002,
            Self::Resource(_) | Self::Config(_) | Self::Internal(_) => -32603,
        }
    }
}
