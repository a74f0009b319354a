//! qBittorrent `DownloadClient` adapter, narrowed from the teacher's
//! `downloaders/src/qbittorrent.rs::QBittorrentClient` (login/session
//! tracking, auth-retry-once, multipart add) down to the single
//! `add_download` shape the dispatcher needs.

use async_trait::async_trait;
use orchestrator_core::domain::AddDownloadRequest;
use orchestrator_core::{DownloadClient, OrchestratorError, Protocol, Result};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct QBittorrentConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub timeout: u64,
}

impl Default for QBittorrentConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            username: "admin".to_string(),
            password: String::new(),
            timeout: 30,
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    authenticated: bool,
    last_auth_time: Option<std::time::Instant>,
}

pub struct QBittorrentClient {
    config: QBittorrentConfig,
    client: Client,
    base_url: Url,
    session_state: Arc<RwLock<SessionState>>,
}

fn service_error(detail: impl Into<String>) -> OrchestratorError {
    OrchestratorError::ExternalServiceError {
        service: "qBittorrent".to_string(),
        error: detail.into(),
    }
}

impl QBittorrentClient {
    pub fn new(config: QBittorrentConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| service_error(format!("invalid base url: {e}")))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .cookie_store(true)
            .build()
            .map_err(|e| service_error(format!("failed to build http client: {e}")))?;

        Ok(Self {
            config,
            client,
            base_url,
            session_state: Arc::new(RwLock::new(SessionState::default())),
        })
    }

    async fn needs_authentication(&self) -> bool {
        let state = self.session_state.read().await;
        match state.last_auth_time {
            _ if !state.authenticated => true,
            Some(last_auth) => last_auth.elapsed() > Duration::from_secs(30 * 60),
            None => true,
        }
    }

    async fn ensure_authenticated(&self) -> Result<()> {
        if self.needs_authentication().await {
            self.login().await?;
        }
        Ok(())
    }

    async fn login(&self) -> Result<()> {
        let login_url = self
            .base_url
            .join("api/v2/auth/login")
            .map_err(|e| service_error(format!("failed to construct login url: {e}")))?;

        let mut form = HashMap::new();
        form.insert("username", &self.config.username);
        form.insert("password", &self.config.password);

        debug!(%login_url, "logging in to qBittorrent");
        let response = self
            .client
            .post(login_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| service_error(format!("login request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(service_error(format!("login failed with status: {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| service_error(format!("failed to read login response: {e}")))?;
        if body.to_lowercase().contains("fail") {
            return Err(OrchestratorError::Unauthorized { service: "qBittorrent".to_string() });
        }

        let mut state = self.session_state.write().await;
        state.authenticated = true;
        state.last_auth_time = Some(std::time::Instant::now());
        info!("logged in to qBittorrent");
        Ok(())
    }

    async fn reset_auth_state(&self) {
        let mut state = self.session_state.write().await;
        state.authenticated = false;
        state.last_auth_time = None;
    }

    fn is_auth_error(&self, error: &OrchestratorError) -> bool {
        matches!(error, OrchestratorError::Unauthorized { .. })
    }

    fn extract_hash_from_magnet(magnet_url: &str) -> Option<String> {
        let start = magnet_url.find("xt=urn:btih:")? + "xt=urn:btih:".len();
        let rest = &magnet_url[start..];
        let hash = rest.split('&').next().unwrap_or(rest);
        Some(hash.to_uppercase())
    }

    async fn add_torrent_internal(&self, request: &AddDownloadRequest) -> Result<String> {
        let add_url = self
            .base_url
            .join("api/v2/torrents/add")
            .map_err(|e| service_error(format!("failed to construct add url: {e}")))?;

        let mut form = reqwest::multipart::Form::new();
        if let Some(magnet) = &request.magnet_uri {
            form = form.text("urls", magnet.clone());
        } else if let Some(url) = &request.download_url {
            form = form.text("urls", url.clone());
        } else if let Some(file) = &request.torrent_file {
            form = form.part(
                "torrents",
                reqwest::multipart::Part::bytes(file.clone())
                    .file_name("release.torrent")
                    .mime_str("application/x-bittorrent")
                    .map_err(|e| service_error(format!("failed to set mime type: {e}")))?,
            );
        } else {
            return Err(OrchestratorError::ValidationError {
                field: "magnet_uri|download_url|torrent_file".to_string(),
                message: "at least one torrent source must be present".to_string(),
            });
        }

        if let Some(category) = &request.category {
            form = form.text("category", category.clone());
        }
        form = form.text("paused", request.paused.to_string());
        if let Some(ratio) = request.seed_ratio_limit {
            form = form.text("ratioLimit", ratio.to_string());
        }
        if let Some(minutes) = request.seed_time_limit_minutes {
            form = form.text("seedingTimeLimit", minutes.to_string());
        }

        debug!(title = %request.title, "adding torrent to qBittorrent");
        let response = self
            .client
            .post(add_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| service_error(format!("add torrent request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(service_error(format!("add torrent failed with status: {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| service_error(format!("failed to read add torrent response: {e}")))?;
        if !body.to_lowercase().contains("ok") && !body.is_empty() {
            return Err(service_error(format!("failed to add torrent: {body}")));
        }

        if let Some(hash) = &request.info_hash {
            return Ok(hash.to_uppercase());
        }
        if let Some(magnet) = &request.magnet_uri {
            if let Some(hash) = Self::extract_hash_from_magnet(magnet) {
                return Ok(hash);
            }
        }
        Ok(format!("unverified-{}", uuid::Uuid::new_v4()))
    }
}

#[async_trait]
impl DownloadClient for QBittorrentClient {
    fn name(&self) -> &str {
        "qBittorrent"
    }

    fn protocol(&self) -> Protocol {
        Protocol::Torrent
    }

    async fn add_download(&self, request: AddDownloadRequest) -> Result<String> {
        self.ensure_authenticated().await?;

        match self.add_torrent_internal(&request).await {
            Ok(hash) => Ok(hash),
            Err(e) if self.is_auth_error(&e) => {
                warn!("auth error adding torrent, retrying with a fresh login");
                self.reset_auth_state().await;
                self.ensure_authenticated().await?;
                self.add_torrent_internal(&request).await
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_localhost() {
        let config = QBittorrentConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = QBittorrentConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(QBittorrentClient::new(config).is_err());
    }

    #[test]
    fn extracts_hash_from_magnet_uri() {
        let magnet = "magnet:?xt=urn:btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a&dn=example";
        assert_eq!(
            QBittorrentClient::extract_hash_from_magnet(magnet),
            Some("C12FE1C06BBA254A9DC9F519B335AA7C1367A88A".to_string())
        );
    }

    #[test]
    fn returns_none_for_non_magnet_input() {
        assert_eq!(QBittorrentClient::extract_hash_from_magnet("not-a-magnet"), None);
    }
}
