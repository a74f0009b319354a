//! Layered configuration: built-in defaults, an optional `config.yaml`,
//! then environment overrides — the same defaults-then-file-then-env
//! split as the teacher's `src/config/mod.rs::AppConfig::from_env`,
//! narrowed to the settings this orchestrator actually needs.

use orchestrator_core::{OrchestratorError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QBittorrentSettings {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl Default for QBittorrentSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            username: "admin".to_string(),
            password: String::new(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub default_requests_per_minute: u32,
    pub use_tiered_search: bool,
    pub cache_ttl_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            concurrency: 5,
            timeout_secs: 30,
            default_requests_per_minute: 60,
            use_tiered_search: true,
            cache_ttl_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingSettings {
    pub filter: Option<String>,
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub qbittorrent: QBittorrentSettings,
    pub search: SearchSettings,
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Defaults, then `config.yaml` in the current directory if present,
    /// then environment variables prefixed `ORCHESTRATOR_`.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file("config.yaml")?.unwrap_or_default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).map_err(|e| OrchestratorError::ConfigurationError {
            field: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self = serde_yaml::from_str(&contents).map_err(|e| OrchestratorError::ConfigurationError {
            field: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(config))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("ORCHESTRATOR_QBITTORRENT_URL") {
            self.qbittorrent.base_url = url;
        }
        if let Ok(user) = env::var("ORCHESTRATOR_QBITTORRENT_USERNAME") {
            self.qbittorrent.username = user;
        }
        if let Ok(pass) = env::var("ORCHESTRATOR_QBITTORRENT_PASSWORD") {
            self.qbittorrent.password = pass;
        }
        if let Ok(concurrency) = env::var("ORCHESTRATOR_SEARCH_CONCURRENCY") {
            if let Ok(value) = concurrency.parse() {
                self.search.concurrency = value;
            }
        }
        if let Ok(filter) = env::var("ORCHESTRATOR_LOG_FILTER") {
            self.logging.filter = Some(filter);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.search.concurrency == 0 {
            return Err(OrchestratorError::ConfigurationError {
                field: "search.concurrency".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if url::Url::parse(&self.qbittorrent.base_url).is_err() {
            return Err(OrchestratorError::ConfigurationError {
                field: "qbittorrent.base_url".to_string(),
                message: "must be a valid url".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let mut config = AppConfig::default();
        config.search.concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_none() {
        assert!(AppConfig::from_file("does-not-exist.yaml").unwrap().is_none());
    }
}
