//! # Gateway Configuration
//!
//! Everything tunable about the gateway in one serde-loaded document.
//! Governance, CSV export, and multi-tenant credential lookup evolved in
//! and out of earlier revisions of this service, so each is an independent
//! toggle rather than an assumption.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::export::DEFAULT_MAX_EXPORT_BYTES;

/// Top-level gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP bind + CORS settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Leading path segment the gateway answers under (`/{service}/{db}`)
    #[serde(default = "default_service_path")]
    pub service_path: String,

    /// Query governance toggle for POSTed queries
    #[serde(default)]
    pub governance: GovernanceConfig,

    /// CSV export toggle and limits
    #[serde(default)]
    pub export: ExportConfig,

    /// Row bound for the default snapshot query
    #[serde(default = "default_snapshot_limit")]
    pub snapshot_limit: usize,

    /// Request-scoped deadline for database work, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means permissive
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Governance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// When false, POSTed queries bypass classification entirely
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// When false, `?export=csv` is refused
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Ceiling on the rendered CSV document, in bytes
    #[serde(default = "default_max_export_bytes")]
    pub max_bytes: usize,

    /// Row bound for the node export query
    #[serde(default = "default_export_limit")]
    pub node_limit: usize,

    /// Row bound for the relationship export query
    #[serde(default = "default_export_limit")]
    pub relationship_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_service_path() -> String {
    "neo4j".to_string()
}

fn default_snapshot_limit() -> usize {
    10
}

fn default_export_limit() -> usize {
    100
}

fn default_max_export_bytes() -> usize {
    DEFAULT_MAX_EXPORT_BYTES
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: default_max_export_bytes(),
            node_limit: default_export_limit(),
            relationship_limit: default_export_limit(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            service_path: default_service_path(),
            governance: GovernanceConfig::default(),
            export: ExportConfig::default(),
            snapshot_limit: default_snapshot_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a JSON file; absent fields take defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("cannot read config file {}: {}", path.display(), e))?;
        serde_json::from_str(&raw)
            .map_err(|e| format!("cannot parse config file {}: {}", path.display(), e))
    }

    /// Socket address string for binding.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.service_path, "neo4j");
        assert_eq!(config.snapshot_limit, 10);
        assert_eq!(config.export.node_limit, 100);
        assert_eq!(config.export.relationship_limit, 100);
        assert_eq!(config.export.max_bytes, 6 * 1024 * 1024);
        assert!(config.governance.enabled);
        assert!(config.export.enabled);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_socket_addr() {
        let config = GatewayConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_partial_file_takes_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"server": {{"port": 9999}}, "governance": {{"enabled": false}}}}"#
        )
        .unwrap();

        let config = GatewayConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.governance.enabled);
        assert_eq!(config.snapshot_limit, 10);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = GatewayConfig::load(Path::new("/nonexistent/gateway.json")).unwrap_err();
        assert!(err.contains("cannot read config file"));
    }
}
