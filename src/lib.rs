//! World Data MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing public data APIs as tools:
//! the current time and location of the host, Open-Meteo weather and air
//! quality, and Finnhub stock market data.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, the main server
//!   and the STDIO/HTTP transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: MCP tools, grouped by the upstream API they wrap
//!   - **resources**: Reference tables and server information readable by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use world_data_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
