//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Base URLs of the upstream APIs.
    pub endpoints: EndpointsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Finnhub API token, required by every `finnhub_*` tool.
    /// Get a free key at: https://finnhub.io/register
    pub finnhub_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "finnhub_api_key",
                &self.finnhub_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CredentialsConfig {
    /// The Finnhub key, if one is set and non-empty.
    pub fn finnhub_key(&self) -> Option<&str> {
        self.finnhub_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Upstream API base URLs.
///
/// Overridable so the tools can be pointed at mirrors or local stubs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// worldtimeapi.org API root (the `/ip` path is appended).
    pub worldtime_url: String,

    /// ipify public IP endpoint.
    pub ipify_url: String,

    /// ip-api.com JSON root (the IP address is appended).
    pub ip_api_url: String,

    /// Open-Meteo forecast endpoint.
    pub open_meteo_forecast_url: String,

    /// Open-Meteo air quality endpoint.
    pub open_meteo_air_quality_url: String,

    /// Finnhub REST API root.
    pub finnhub_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            worldtime_url: "http://worldtimeapi.org/api".to_string(),
            ipify_url: "https://api.ipify.org".to_string(),
            ip_api_url: "http://ip-api.com/json".to_string(),
            open_meteo_forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            open_meteo_air_quality_url: "https://air-quality-api.open-meteo.com/v1/air-quality"
                .to_string(),
            finnhub_url: "https://finnhub.io/api/v1".to_string(),
        }
    }
}

impl EndpointsConfig {
    /// Point every endpoint at the same host, keeping the upstream path layout.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            worldtime_url: format!("{base}/api"),
            ipify_url: format!("{base}/ipify"),
            ip_api_url: format!("{base}/json"),
            open_meteo_forecast_url: format!("{base}/v1/forecast"),
            open_meteo_air_quality_url: format!("{base}/v1/air-quality"),
            finnhub_url: format!("{base}/finnhub/v1"),
        }
    }

    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("worldtime_url", &self.worldtime_url),
            ("ipify_url", &self.ipify_url),
            ("ip_api_url", &self.ip_api_url),
            ("open_meteo_forecast_url", &self.open_meteo_forecast_url),
            ("open_meteo_air_quality_url", &self.open_meteo_air_quality_url),
            ("finnhub_url", &self.finnhub_url),
        ]
    }

    fn load_env(&mut self) {
        let overrides = [
            ("MCP_WORLDTIME_URL", &mut self.worldtime_url),
            ("MCP_IPIFY_URL", &mut self.ipify_url),
            ("MCP_IP_API_URL", &mut self.ip_api_url),
            ("MCP_OPEN_METEO_FORECAST_URL", &mut self.open_meteo_forecast_url),
            (
                "MCP_OPEN_METEO_AIR_QUALITY_URL",
                &mut self.open_meteo_air_quality_url,
            ),
            ("MCP_FINNHUB_URL", &mut self.finnhub_url),
        ];

        for (var, slot) in overrides {
            if let Ok(url) = std::env::var(var) {
                info!("{} overridden: {}", var, url);
                *slot = url;
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "world-data-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`. The Finnhub key is
    /// also read from the unprefixed `FINNHUB_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        let finnhub_key = std::env::var("MCP_FINNHUB_API_KEY")
            .or_else(|_| std::env::var("FINNHUB_API_KEY"))
            .ok();
        if finnhub_key.is_some() {
            info!("Finnhub API key loaded from environment");
        } else {
            warn!("MCP_FINNHUB_API_KEY not set - finnhub_* tools will report a configuration error");
        }
        config.credentials.finnhub_api_key = finnhub_key;

        config.endpoints.load_env();

        config
    }

    /// Check the configuration before the server starts.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in self.endpoints.entries() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::config(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        Ok(())
    }
}
