//! Tool dispatch errors.
//!
//! Upstream failures are not represented here: they end up in the text of
//! the tool result. These cover calls that never reach a tool.

use thiserror::Error;

/// Errors raised while dispatching a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The arguments did not match the tool's parameter schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
