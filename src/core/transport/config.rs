//! Transport selection and HTTP listener settings.

use serde::{Deserialize, Serialize};
#[cfg(feature = "http")]
use tracing::warn;

/// Which transport the server speaks, chosen with `MCP_TRANSPORT`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Newline-delimited JSON-RPC over stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP listener settings.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "HttpConfig::default_port")]
    pub port: u16,

    #[serde(default = "HttpConfig::default_host")]
    pub host: String,

    /// Route that accepts JSON-RPC requests.
    #[serde(default = "HttpConfig::default_rpc_path")]
    pub rpc_path: String,

    /// Allow cross-origin requests from browser clients.
    #[serde(default = "HttpConfig::default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl HttpConfig {
    fn default_port() -> u16 {
        8080
    }

    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    fn default_rpc_path() -> String {
        "/mcp".to_string()
    }

    fn default_cors() -> bool {
        true
    }

    /// Read `MCP_HTTP_*` variables; unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("MCP_HTTP_PORT") {
            match raw.trim().parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("Ignoring invalid MCP_HTTP_PORT '{}', using {}", raw, config.port),
            }
        }
        if let Ok(host) = std::env::var("MCP_HTTP_HOST") {
            config.host = host;
        }
        if let Ok(path) = std::env::var("MCP_HTTP_PATH") {
            config.rpc_path = if path.starts_with('/') {
                path
            } else {
                format!("/{path}")
            };
        }
        if let Ok(cors) = std::env::var("MCP_HTTP_CORS") {
            config.enable_cors = !matches!(cors.trim().to_lowercase().as_str(), "false" | "0" | "no");
        }

        config
    }

    /// `host:port` to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: Self::default_port(),
            host: Self::default_host(),
            rpc_path: Self::default_rpc_path(),
            enable_cors: Self::default_cors(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

impl TransportConfig {
    /// HTTP transport on `host:port` with the default route and CORS.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Pick the transport named by `MCP_TRANSPORT`, defaulting when unset
    /// or when the named transport is not compiled in.
    pub fn from_env() -> Self {
        match std::env::var("MCP_TRANSPORT") {
            Ok(name) => Self::named(&name),
            Err(_) => Self::default(),
        }
    }

    fn named(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            other => {
                tracing::warn!("Unknown or disabled transport '{}', using default", other);
                Self::default()
            }
        }
    }

    /// Human-readable summary for the startup log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}{}", cfg.address(), cfg.rpc_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "stdio")]
    #[test]
    fn test_default_is_stdio() {
        assert!(matches!(TransportConfig::default(), TransportConfig::Stdio));
        assert!(TransportConfig::default().description().starts_with("STDIO"));
    }

    #[cfg(feature = "stdio")]
    #[test]
    fn test_unknown_name_falls_back() {
        assert!(matches!(TransportConfig::named("carrier-pigeon"), TransportConfig::Stdio));
        assert!(matches!(TransportConfig::named(" STDIO "), TransportConfig::Stdio));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_description() {
        let config = TransportConfig::http(9000, "0.0.0.0");
        assert_eq!(config.description(), "HTTP on 0.0.0.0:9000/mcp");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_config_deserializes_with_defaults() {
        let config: TransportConfig =
            serde_json::from_value(serde_json::json!({ "type": "http", "port": 3000 })).unwrap();
        let TransportConfig::Http(http) = config else {
            panic!("expected http transport");
        };
        assert_eq!(http.address(), "127.0.0.1:3000");
        assert_eq!(http.rpc_path, "/mcp");
        assert!(http.enable_cors);
    }
}
