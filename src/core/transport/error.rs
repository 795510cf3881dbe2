//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Failures that stop a transport from serving.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP listener could not bind.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The MCP session could not be established.
    #[error("Failed to start MCP session: {0}")]
    Session(String),

    /// The server stopped with an error while serving.
    #[error("Transport stopped unexpectedly: {0}")]
    Serve(String),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn session(msg: impl ToString) -> Self {
        Self::Session(msg.to_string())
    }

    pub fn serve(msg: impl ToString) -> Self {
        Self::Serve(msg.to_string())
    }
}
