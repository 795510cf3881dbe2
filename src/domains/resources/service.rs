//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! Resources are defined in `definitions/` and registered via `registry.rs`.

use std::collections::BTreeMap;
use std::sync::Arc;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use tracing::{debug, info};

use super::definitions::server_info;
use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::config::Config;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Server configuration, read by dynamic resources.
    config: Arc<Config>,

    /// Registered resources keyed by URI.
    resources: BTreeMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Server description, rendered from the live configuration.
    ServerInfo,
}

impl ResourceService {
    /// Create a new ResourceService with the given configuration.
    pub fn new(config: Arc<Config>) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            config,
            resources: BTreeMap::new(),
        };
        for entry in get_all_resources() {
            service.register_resource(entry);
        }
        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources, ordered by URI.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let text = match &entry.content {
            ResourceContent::Text(text) => text.clone(),
            ResourceContent::ServerInfo => server_info::render(&self.config)?,
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ResourceService {
        ResourceService::new(Arc::new(Config::default()))
    }

    fn text_of(result: &ReadResourceResult) -> &str {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text,
            other => panic!("expected text contents, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resource_service_lists_sorted() {
        let resources = service().list_resources().await;
        let uris: Vec<_> = resources.iter().map(|r| r.raw.uri.as_str()).collect();
        assert_eq!(
            uris,
            vec![
                "mcp://server/info",
                "reference://aqi-levels",
                "reference://weather-codes"
            ]
        );
    }

    #[tokio::test]
    async fn test_read_static_resource() {
        let result = service()
            .read_resource("reference://weather-codes")
            .await
            .unwrap();
        assert!(text_of(&result).contains("| 95 | Thunderstorm |"));
    }

    #[tokio::test]
    async fn test_read_dynamic_resource() {
        let result = service().read_resource("mcp://server/info").await.unwrap();
        let info: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(info["name"], "world-data-mcp-server");
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let err = service()
            .read_resource("mcp://server/nonexistent")
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }
}
