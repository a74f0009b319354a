//! Download Dispatcher (C10). Validates a grab request, branches on
//! protocol, resolves the download URL through the owning indexer, and
//! invokes the matching `DownloadClient`. Grounded on the overall shape
//! of `downloaders/src/qbittorrent.rs`'s call sites in the teacher's
//! release-grab flow, generalized to a protocol-keyed client registry
//! since the teacher hardcodes a single qBittorrent instance.

use crate::streaming::synthesize_strm_record;
use orchestrator_core::domain::AddDownloadRequest;
use orchestrator_core::model::{category_content_type, ContentType, DownloadLocator, Protocol};
use orchestrator_core::{DownloadClient, IndexerAdapter, OrchestratorError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct GrabRequest {
    pub title: String,
    pub locator: DownloadLocator,
    pub info_hash: Option<String>,
    pub indexer_id: Option<i32>,
    pub protocol: Protocol,
    pub target_content_type: ContentType,
    pub categories: Vec<u32>,
    pub is_automatic: bool,
    pub force: bool,
    pub category: Option<String>,
    pub seed_ratio_limit: Option<f64>,
    pub seed_time_limit_minutes: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct GrabResponse {
    pub queue_id: String,
    pub hash: String,
    pub client_name: String,
    pub category: Option<String>,
    pub was_duplicate: bool,
    pub is_upgrade: bool,
}

pub struct DownloadDispatcher {
    clients: HashMap<Protocol, Arc<dyn DownloadClient>>,
    indexers: HashMap<i32, Arc<dyn IndexerAdapter>>,
}

impl DownloadDispatcher {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
            indexers: HashMap::new(),
        }
    }

    pub fn register_client(&mut self, client: Arc<dyn DownloadClient>) {
        self.clients.insert(client.protocol(), client);
    }

    pub fn register_indexer(&mut self, indexer: Arc<dyn IndexerAdapter>) {
        self.indexers.insert(indexer.indexer_id(), indexer);
    }

    fn validate(&self, request: &GrabRequest) -> Result<()> {
        let locator_present = match &request.locator {
            DownloadLocator::DownloadUrl(u) | DownloadLocator::MagnetUrl(u) | DownloadLocator::StreamUrl(u) => {
                !u.is_empty()
            }
        };
        let has_source = request.info_hash.is_some() || locator_present;
        if !has_source {
            return Err(OrchestratorError::ValidationError {
                field: "locator".to_string(),
                message: "a download url, magnet url, or info hash is required".to_string(),
            });
        }

        if !request.categories.is_empty() {
            let mismatched = request
                .categories
                .iter()
                .all(|&c| category_content_type(c) != request.target_content_type);
            if mismatched {
                return Err(OrchestratorError::CategoryMismatch {
                    detail: format!(
                        "release categories {:?} do not match target {:?}",
                        request.categories, request.target_content_type
                    ),
                });
            }
        }

        Ok(())
    }

    /// Dereferences a hyperlink through the owning indexer so cookies,
    /// API keys, and rate limits apply, per the URL-resolution contract.
    async fn resolve_url(&self, request: &GrabRequest) -> Result<DownloadLocator> {
        match (&request.locator, request.indexer_id) {
            (DownloadLocator::DownloadUrl(url), Some(indexer_id)) if request.protocol == Protocol::Torrent => {
                let indexer = self
                    .indexers
                    .get(&indexer_id)
                    .ok_or_else(|| OrchestratorError::NotFound { resource: format!("indexer {indexer_id}") })?;
                let resolved = indexer.reconstruct_download_url(url).await?;
                Ok(DownloadLocator::DownloadUrl(resolved))
            }
            (other, _) => Ok(other.clone()),
        }
    }

    pub async fn grab(&self, request: GrabRequest) -> Result<GrabResponse> {
        self.validate(&request)?;

        if request.protocol == Protocol::Streaming {
            let stream_url = match &request.locator {
                DownloadLocator::StreamUrl(url) => url.clone(),
                other => {
                    return Err(OrchestratorError::ValidationError {
                        field: "locator".to_string(),
                        message: format!("streaming grab requires a stream url, got {other:?}"),
                    });
                }
            };
            let record = synthesize_strm_record(&request.title, &stream_url);
            info!(virtual_path = %record.virtual_path, "synthesized streaming indirection record");
            return Ok(GrabResponse {
                queue_id: format!("strm-{}", uuid::Uuid::new_v4()),
                hash: record.virtual_path,
                client_name: "streaming".to_string(),
                category: request.category,
                was_duplicate: false,
                is_upgrade: false,
            });
        }

        let client = self
            .clients
            .get(&request.protocol)
            .ok_or_else(|| OrchestratorError::ConfigurationError {
                field: "download_client".to_string(),
                message: format!("no download client configured for protocol {:?}", request.protocol),
            })?;

        let resolved_locator = self.resolve_url(&request).await?;
        let (magnet_uri, download_url) = match resolved_locator {
            DownloadLocator::MagnetUrl(u) => (Some(u), None),
            DownloadLocator::DownloadUrl(u) => (None, Some(u)),
            DownloadLocator::StreamUrl(_) => (None, None),
        };

        let add_request = AddDownloadRequest {
            magnet_uri,
            torrent_file: None,
            info_hash: request.info_hash.clone(),
            download_url,
            title: request.title.clone(),
            category: request.category.clone(),
            paused: false,
            priority: if request.is_automatic { 0 } else { 1 },
            seed_ratio_limit: request.seed_ratio_limit,
            seed_time_limit_minutes: request.seed_time_limit_minutes,
        };

        match client.add_download(add_request).await {
            Ok(hash) => Ok(GrabResponse {
                queue_id: format!("queue-{}", uuid::Uuid::new_v4()),
                hash,
                client_name: client.name().to_string(),
                category: request.category,
                was_duplicate: false,
                is_upgrade: false,
            }),
            Err(OrchestratorError::DuplicateDownload { hash }) => {
                warn!(%hash, "download already present, linking queue entry to existing hash");
                Ok(GrabResponse {
                    queue_id: format!("queue-{}", uuid::Uuid::new_v4()),
                    hash,
                    client_name: client.name().to_string(),
                    category: request.category,
                    was_duplicate: true,
                    is_upgrade: false,
                })
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for DownloadDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubClient {
        protocol: Protocol,
        result: std::sync::Mutex<Option<Result<String>>>,
    }

    #[async_trait]
    impl DownloadClient for StubClient {
        fn name(&self) -> &str {
            "stub"
        }

        fn protocol(&self) -> Protocol {
            self.protocol
        }

        async fn add_download(&self, _request: AddDownloadRequest) -> Result<String> {
            self.result.lock().unwrap().take().unwrap()
        }
    }

    fn torrent_request() -> GrabRequest {
        GrabRequest {
            title: "Some Movie".to_string(),
            locator: DownloadLocator::MagnetUrl("magnet:?xt=urn:btih:abc".to_string()),
            info_hash: Some("abc".to_string()),
            indexer_id: None,
            protocol: Protocol::Torrent,
            target_content_type: ContentType::Movie,
            categories: vec![2000],
            is_automatic: true,
            force: false,
            category: Some("movies".to_string()),
            seed_ratio_limit: None,
            seed_time_limit_minutes: None,
        }
    }

    #[tokio::test]
    async fn rejects_mismatched_categories() {
        let dispatcher = DownloadDispatcher::new();
        let mut request = torrent_request();
        request.categories = vec![5000];
        let err = dispatcher.grab(request).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::CategoryMismatch { .. }));
    }

    #[tokio::test]
    async fn missing_client_for_protocol_is_a_configuration_error() {
        let dispatcher = DownloadDispatcher::new();
        let err = dispatcher.grab(torrent_request()).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::ConfigurationError { .. }));
    }

    #[tokio::test]
    async fn duplicate_download_is_treated_as_success() {
        let mut dispatcher = DownloadDispatcher::new();
        dispatcher.register_client(Arc::new(StubClient {
            protocol: Protocol::Torrent,
            result: std::sync::Mutex::new(Some(Err(OrchestratorError::DuplicateDownload { hash: "abc".to_string() }))),
        }));
        let response = dispatcher.grab(torrent_request()).await.unwrap();
        assert!(response.was_duplicate);
        assert_eq!(response.hash, "abc");
    }

    #[tokio::test]
    async fn streaming_grab_bypasses_clients_entirely() {
        let dispatcher = DownloadDispatcher::new();
        let mut request = torrent_request();
        request.protocol = Protocol::Streaming;
        request.locator = DownloadLocator::StreamUrl("https://stream.example/x".to_string());
        let response = dispatcher.grab(request).await.unwrap();
        assert_eq!(response.client_name, "streaming");
        assert!(response.hash.ends_with(".strm"));
    }
}
