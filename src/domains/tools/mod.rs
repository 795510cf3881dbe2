//! Tools domain module.
//!
//! Every tool wraps one upstream HTTP API and returns a single plain-text
//! report. Tools are stateless; the only input besides the call arguments
//! is the shared [`Config`](crate::core::Config).
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, grouped by upstream API
//! - `router.rs` - Dynamic ToolRouter builder for the STDIO transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Dispatch error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a file in the matching `definitions/` group
//! 2. Implement `ToolDefinition` (params struct + `report()`)
//! 3. Add the route in `router.rs` and the dispatch arm in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
