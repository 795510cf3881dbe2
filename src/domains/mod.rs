//! Domains module containing business logic organized by bounded contexts.
//!
//! - `tools`: the world time, weather and market data tools
//! - `resources`: read-only reference tables and server metadata

pub mod resources;
pub mod tools;
