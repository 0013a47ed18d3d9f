use anyhow::{Context, Result};
use sapirag_core::api::DEFAULT_BASE_URL;
use sapirag_core::{HttpApi, RagBackend};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `server.base_url`
pub const URL_ENV: &str = "SAPIRAG_URL";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub rag: RagConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Unbounded when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RagConfig {
    #[serde(default)]
    pub backend: RagBackend,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default = "default_confirm_deletes")]
    pub confirm_deletes: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_confirm_deletes() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            confirm_deletes: default_confirm_deletes(),
        }
    }
}

impl Config {
    /// Build the HTTP client described by this config
    pub fn build_api(&self) -> Result<HttpApi> {
        let api = HttpApi::new(
            &self.server.base_url,
            Duration::from_secs(self.server.connect_timeout_secs),
            self.server.request_timeout_secs.map(Duration::from_secs),
        )
        .context("Failed to build HTTP client")?;
        Ok(api.with_rag_backend(self.rag.backend))
    }
}

/// Load config from file or use defaults, then apply `SAPIRAG_URL`
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(path) = path {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
        let content = fs::read_to_string(&expanded)
            .context(format!("Failed to read config file: {:?}", expanded))?;
        parse_config(&content)?
    } else {
        Config::default()
    };

    if let Ok(url) = std::env::var(URL_ENV) {
        if !url.is_empty() {
            config.server.base_url = url;
        }
    }

    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).context("Failed to parse TOML config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.server.connect_timeout_secs, 10);
        assert_eq!(config.server.request_timeout_secs, None);
        assert_eq!(config.rag.backend, RagBackend::Hosted);
        assert!(config.ui.confirm_deletes);
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config(
            r#"
[server]
base_url = "http://rag.internal:9000"
request_timeout_secs = 120

[rag]
backend = "local"
"#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "http://rag.internal:9000");
        assert_eq!(config.server.request_timeout_secs, Some(120));
        assert_eq!(config.server.connect_timeout_secs, 10);
        assert_eq!(config.rag.backend, RagBackend::Local);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(parse_config("[rag]\nbackend = \"cloud\"\n").is_err());
    }

    #[test]
    fn test_default_file_parses() {
        let config = parse_config(crate::commands::init::DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
        assert!(config.ui.confirm_deletes);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sapirag.toml");
        fs::write(&path, "[ui]\nconfirm_deletes = false\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert!(!config.ui.confirm_deletes);
    }
}
