use anyhow::{Context, Result};
use mailrelay_mcp::{build_catalog, McpServer};
use mailrelay_sdk::{RetryConfig, SendGridClient, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::api::sse::SessionRegistry;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub sendgrid: SendGridConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendGridConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    RetryConfig::default().max_retries
}

impl Default for SendGridConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            Self::parse(&content)
        } else {
            tracing::info!(path = %config_path.display(), "Configuration file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration file")
    }

    /// Build the SendGrid client described by this config.
    pub fn sendgrid_client(&self, api_key: &str) -> Result<SendGridClient> {
        let retry_config = RetryConfig {
            max_retries: self.sendgrid.max_retries,
            ..RetryConfig::default()
        };

        SendGridClient::builder()
            .base_url(&self.sendgrid.base_url)
            .api_key(api_key)
            .timeout(Duration::from_secs(self.sendgrid.timeout_secs))
            .retry_config(retry_config)
            .build()
            .context("Failed to create SendGrid client")
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: Arc<McpServer>,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(config: &ServerConfig, api_key: &str) -> Result<Self> {
        let client = Arc::new(config.sendgrid_client(api_key)?);

        // A broken catalog is served as an error on every tool request
        let catalog = build_catalog(client);
        if let Err(e) = &catalog {
            tracing::error!(error = %e, "Failed to build tool catalog");
        }

        Ok(Self::with_server(McpServer::from_catalog(catalog)))
    }

    pub fn with_server(mcp: McpServer) -> Self {
        Self {
            mcp: Arc::new(mcp),
            sessions: SessionRegistry::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_section_missing() {
        let config = ServerConfig::parse("").unwrap();

        assert_eq!(config.sendgrid.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.sendgrid.timeout_secs, 30);
        assert_eq!(config.sendgrid.max_retries, RetryConfig::default().max_retries);
    }

    #[test]
    fn test_partial_section() {
        let config = ServerConfig::parse(
            r#"
            [sendgrid]
            base_url = "http://localhost:9000"
            max_retries = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.sendgrid.base_url, "http://localhost:9000");
        assert_eq!(config.sendgrid.max_retries, 0);
        assert_eq!(config.sendgrid.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(ServerConfig::parse("[sendgrid\nbase_url =").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ServerConfig::load(Path::new("/nonexistent/mailrelay.toml")).unwrap();
        assert_eq!(config.sendgrid.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_state_serves_full_catalog() {
        let state = AppState::new(&ServerConfig::default(), "SG.test").unwrap();

        let tools = state.mcp.list_tools().unwrap().tools;
        assert_eq!(tools.len(), 16);
    }
}
