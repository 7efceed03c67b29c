//! Server configuration
//!
//! Deployment knobs live in a small YAML file; everything defaults so the
//! demo and tests can run with no file at all.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Server-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,

    /// Apply a permissive CORS layer. Leave off when a gateway handles CORS.
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            permissive_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn from_yaml_str(source: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(source).context("failed to parse server config")
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read server config {}", path.display()))?;
        Self::from_yaml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert!(!config.permissive_cors);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ServerConfig::from_yaml_str("bind_addr: 0.0.0.0:8080\n").expect("valid yaml");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(!config.permissive_cors);
    }

    #[test]
    fn test_full_yaml() {
        let config = ServerConfig::from_yaml_str("bind_addr: 0.0.0.0:8080\npermissive_cors: true\n")
            .expect("valid yaml");
        assert!(config.permissive_cors);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        assert!(ServerConfig::from_yaml_str(": nope").is_err());
    }
}
