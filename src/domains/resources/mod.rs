//! Resources domain module.
//!
//! Read-only reference data for MCP clients: the lookup tables the weather
//! tools use to label their reports, plus a description of this server.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{get_all_resources, resource_uris};
pub use service::{ResourceContent, ResourceEntry, ResourceService};
