//! Deterministic in-memory `IndexerAdapter`, used by the composition
//! root's demo mode and by orchestrator tests that need a real trait
//! object rather than a mock.

use async_trait::async_trait;
use orchestrator_core::domain::TorrentFetchResult;
use orchestrator_core::model::{IndexerCapabilities, ReleaseResult, SearchCriteria};
use orchestrator_core::{IndexerAdapter, OrchestratorError, Protocol, Result};

pub struct MemoryIndexerAdapter {
    indexer_id: i32,
    base_url: String,
    protocol: Protocol,
    capabilities: IndexerCapabilities,
    fixtures: Vec<ReleaseResult>,
}

impl MemoryIndexerAdapter {
    pub fn new(
        indexer_id: i32,
        base_url: impl Into<String>,
        protocol: Protocol,
        capabilities: IndexerCapabilities,
        fixtures: Vec<ReleaseResult>,
    ) -> Self {
        Self {
            indexer_id,
            base_url: base_url.into(),
            protocol,
            capabilities,
            fixtures,
        }
    }
}

#[async_trait]
impl IndexerAdapter for MemoryIndexerAdapter {
    fn indexer_id(&self) -> i32 {
        self.indexer_id
    }

    fn protocol(&self) -> Protocol {
        self.protocol
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn capabilities(&self) -> &IndexerCapabilities {
        &self.capabilities
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<ReleaseResult>> {
        let needles = criteria.titles_to_try();
        if needles.is_empty() {
            return Ok(self.fixtures.clone());
        }
        let matches: Vec<ReleaseResult> = self
            .fixtures
            .iter()
            .filter(|release| {
                needles
                    .iter()
                    .any(|needle| release.title.to_lowercase().contains(&needle.to_lowercase()))
            })
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn download_torrent(&self, url: &str) -> Result<TorrentFetchResult> {
        if url.is_empty() {
            return Err(OrchestratorError::NotFound { resource: url.to_string() });
        }
        Ok(TorrentFetchResult {
            success: true,
            data: Some(b"fake torrent bytes".to_vec()),
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestrator_core::model::{CommonCriteria, DownloadLocator};

    fn fixture(title: &str) -> ReleaseResult {
        ReleaseResult {
            guid: title.to_string(),
            title: title.to_string(),
            indexer_id: 1,
            indexer_name: "memory".to_string(),
            indexer_priority: 25,
            protocol: Protocol::Torrent,
            published_at: None,
            size: Some(1_000_000),
            categories: vec![2000],
            locator: DownloadLocator::MagnetUrl("magnet:?xt=urn:btih:x".to_string()),
            info_hash: Some("x".to_string()),
            seeders: Some(5),
            leechers: Some(1),
        }
    }

    #[tokio::test]
    async fn filters_fixtures_by_title_substring() {
        let adapter = MemoryIndexerAdapter::new(
            1,
            "https://example.test",
            Protocol::Torrent,
            IndexerCapabilities::default(),
            vec![fixture("Some.Movie.2020.1080p"), fixture("Other.Movie.2021.720p")],
        );
        let criteria = SearchCriteria::Basic(orchestrator_core::model::BasicCriteria {
            common: CommonCriteria {
                query: Some("some movie".to_string()),
                ..Default::default()
            },
            search_source: orchestrator_core::model::SearchSource::Interactive,
        });
        let results = adapter.search(&criteria).await.unwrap();
        assert_eq!(results.len(), 1);
    }
}
