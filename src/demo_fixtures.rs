//! Deterministic indexer fixtures for the CLI demo, standing in for a
//! real indexer registry (persistence is an external collaborator per
//! the spec's Non-goals).

use orchestrator_core::model::{
    CategoryId, DownloadLocator, EpisodeFormat, IndexerCapabilities, IndexerInstance,
    ModeCapability, MovieFormat, Protocol, ReleaseResult,
};
use orchestrator_core::IndexerAdapter;
use orchestrator_indexers::MemoryIndexerAdapter;
use std::collections::HashSet;
use std::sync::Arc;

fn release(guid: &str, title: &str, indexer_id: i32, categories: Vec<CategoryId>, seeders: u32) -> ReleaseResult {
    ReleaseResult {
        guid: guid.to_string(),
        title: title.to_string(),
        indexer_id,
        indexer_name: format!("demo-indexer-{indexer_id}"),
        indexer_priority: indexer_id,
        protocol: Protocol::Torrent,
        published_at: None,
        size: Some(4_000_000_000),
        categories,
        locator: DownloadLocator::MagnetUrl(format!("magnet:?xt=urn:btih:{guid}")),
        info_hash: Some(guid.to_string()),
        seeders: Some(seeders),
        leechers: Some(1),
    }
}

fn movie_capabilities() -> IndexerCapabilities {
    IndexerCapabilities {
        categories: HashSet::from([2000, 2040, 2045]),
        movie_search: ModeCapability { available: true, supported_params: HashSet::new() },
        tv_search: ModeCapability::default(),
        movie_formats: vec![MovieFormat::Standard],
        episode_formats: vec![],
    }
}

fn tv_capabilities() -> IndexerCapabilities {
    IndexerCapabilities {
        categories: HashSet::from([5000, 5030, 5040]),
        movie_search: ModeCapability::default(),
        tv_search: ModeCapability { available: true, supported_params: HashSet::new() },
        movie_formats: vec![],
        episode_formats: vec![EpisodeFormat::Standard],
    }
}

pub fn bundled_indexers() -> Vec<(IndexerInstance, Arc<dyn IndexerAdapter>)> {
    let movie_fixtures = vec![
        release("demo-movie-2160p", "Some.Movie.2021.2160p.UHD.BluRay.REMUX.HDR10.DTS-HD.MA-GROUP", 1, vec![2040], 50),
        release("demo-movie-1080p", "Some.Movie.2021.1080p.WEB-DL.DDP5.1.H264-GROUP", 1, vec![2040], 20),
        release("demo-movie-720p", "Some.Movie.2021.720p.WEBRip.x264-GROUP", 1, vec![2040], 2),
    ];
    let tv_fixtures = vec![
        release("demo-tv-s01e01", "Some.Show.S01E01.1080p.WEB-DL.DDP5.1.H264-GROUP", 2, vec![5040], 30),
        release("demo-tv-s01-pack", "Some.Show.S01.COMPLETE.1080p.WEB-DL.DDP5.1.H264-GROUP", 2, vec![5040], 15),
    ];

    let movie_indexer = IndexerInstance {
        id: 1,
        name: "demo-movie-indexer".to_string(),
        protocol: Protocol::Torrent,
        base_url: "https://demo-movie.example".to_string(),
        capabilities: movie_capabilities(),
        interactive_enabled: true,
        automatic_enabled: true,
        seed_ratio: Some(1.0),
        seed_time_minutes: Some(0),
        requests_per_minute: 60,
        protocol_settings: serde_json::Value::Null,
    };
    let tv_indexer = IndexerInstance {
        id: 2,
        name: "demo-tv-indexer".to_string(),
        protocol: Protocol::Torrent,
        base_url: "https://demo-tv.example".to_string(),
        capabilities: tv_capabilities(),
        interactive_enabled: true,
        automatic_enabled: true,
        seed_ratio: Some(1.0),
        seed_time_minutes: Some(0),
        requests_per_minute: 60,
        protocol_settings: serde_json::Value::Null,
    };

    let movie_adapter: Arc<dyn IndexerAdapter> = Arc::new(MemoryIndexerAdapter::new(
        1,
        movie_indexer.base_url.clone(),
        Protocol::Torrent,
        movie_capabilities(),
        movie_fixtures,
    ));
    let tv_adapter: Arc<dyn IndexerAdapter> = Arc::new(MemoryIndexerAdapter::new(
        2,
        tv_indexer.base_url.clone(),
        Protocol::Torrent,
        tv_capabilities(),
        tv_fixtures,
    ));

    vec![(movie_indexer, movie_adapter), (tv_indexer, tv_adapter)]
}
