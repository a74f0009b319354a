//! External interfaces the orchestrator consumes. Modeled after the
//! `#[async_trait] pub trait XRepository: Send + Sync` idiom in
//! `core/src/domain/repositories.rs` — one method per verb, `Result<T>`
//! returns, no assumption about the concrete transport.

use crate::model::{IndexerCapabilities, ReleaseResult, SearchCriteria};
use crate::{Protocol, Result};
use async_trait::async_trait;
use serde_json::Value;

pub struct TorrentFetchResult {
    pub success: bool,
    pub data: Option<Vec<u8>>,
    pub error: Option<String>,
}

#[async_trait]
pub trait IndexerAdapter: Send + Sync {
    fn indexer_id(&self) -> i32;
    fn protocol(&self) -> Protocol;
    fn base_url(&self) -> &str;
    fn capabilities(&self) -> &IndexerCapabilities;

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<ReleaseResult>>;
    async fn download_torrent(&self, url: &str) -> Result<TorrentFetchResult>;

    /// Rewrites a redacted URL (API key placeholder reinserted by a UI
    /// layer) using this indexer's live credentials. Default: identity.
    async fn reconstruct_download_url(&self, redacted_url: &str) -> Result<String> {
        Ok(redacted_url.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TvExternalIds {
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct SeasonInfo {
    pub season_number: u32,
    pub episode_count: u32,
}

#[derive(Debug, Clone)]
pub struct TvShowInfo {
    pub seasons: Vec<SeasonInfo>,
    pub number_of_episodes: u32,
}

/// Resolves cross-referenced external ids and episode counts. No
/// concrete implementation ships in this repo; the real TMDB-backed one
/// is an external collaborator (persistence and the HTTP surface are out
/// of scope for this crate).
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    async fn get_movie_external_ids(&self, tmdb_id: i64) -> Result<Option<String>>;
    async fn get_tv_external_ids(&self, tmdb_id: i64) -> Result<TvExternalIds>;
    async fn get_tv_show(&self, tmdb_id: i64) -> Result<TvShowInfo>;
    async fn get_season(&self, tmdb_id: i64, season_number: u32) -> Result<SeasonInfo>;
}

#[derive(Debug, Clone)]
pub struct AddDownloadRequest {
    pub magnet_uri: Option<String>,
    pub torrent_file: Option<Vec<u8>>,
    pub info_hash: Option<String>,
    pub download_url: Option<String>,
    pub title: String,
    pub category: Option<String>,
    pub paused: bool,
    pub priority: i32,
    pub seed_ratio_limit: Option<f64>,
    pub seed_time_limit_minutes: Option<u32>,
}

#[async_trait]
pub trait DownloadClient: Send + Sync {
    fn name(&self) -> &str;
    fn protocol(&self) -> Protocol;

    /// May return `Err(OrchestratorError::DuplicateDownload{hash})` which
    /// the dispatcher treats as success and links to the existing hash.
    async fn add_download(&self, request: AddDownloadRequest) -> Result<String>;
}

/// Settings carried on an indexer record but opaque to the orchestrator;
/// downstream adapters interpret these as they see fit (e.g. category
/// mappings, auth tokens).
pub type ProtocolSettings = Value;
