//! Composition root. Replaces the teacher's axum HTTP server entry
//! point — out of scope here — with a `clap`-driven CLI that wires the
//! same components a server would: health tracker, rate-limit
//! governor, search orchestrator, scoring profile, and download
//! dispatcher, all constructed once at startup rather than behind
//! process-wide singletons (REDESIGN FLAGS).

mod config;
mod demo_fixtures;

use clap::{Parser, Subcommand};
use config::AppConfig;
use orchestrator_core::model::{
    BasicCriteria, CommonCriteria, MovieCriteria, SearchCriteria, SearchSource, TvCriteria,
};
use orchestrator_core::{OrchestratorError, Result};
use orchestrator_decision::ScoringProfile;
use orchestrator_downloaders::{DownloadDispatcher, GrabRequest, QBittorrentClient, QBittorrentConfig};
use orchestrator_indexers::{
    HealthTracker, MemoryIndexerAdapter, RateLimitGovernor, SearchOptions, SearchOrchestrator,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "release-orchestrator", about = "Media release search and acquisition orchestrator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an interactive search against the bundled in-memory indexer fixtures.
    Search {
        query: String,
        #[arg(long)]
        movie: bool,
        #[arg(long)]
        season: Option<u32>,
        #[arg(long)]
        episode: Option<u32>,
    },
    /// Print the effective configuration and exit.
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = AppConfig::load()?;
    info!(qbittorrent_url = %config.qbittorrent.base_url, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Command::Config => {
            println!("{}", serde_yaml::to_string(&config).unwrap_or_default());
            Ok(())
        }
        Command::Search { query, movie, season, episode } => run_search(&config, query, movie, season, episode).await,
    }
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_criteria(query: String, movie: bool, season: Option<u32>, episode: Option<u32>) -> Result<SearchCriteria> {
    let common = CommonCriteria {
        query: Some(query),
        ..CommonCriteria::default()
    };

    let criteria = if movie {
        SearchCriteria::Movie(MovieCriteria {
            common,
            year: None,
            imdb_id: None,
            tmdb_id: None,
            search_source: SearchSource::Interactive,
        })
    } else if season.is_some() || episode.is_some() {
        SearchCriteria::Tv(TvCriteria {
            common,
            imdb_id: None,
            tmdb_id: None,
            tvdb_id: None,
            tvmaze_id: None,
            season,
            episode,
            preferred_episode_format: None,
            search_source: SearchSource::Interactive,
        })
    } else {
        SearchCriteria::Basic(BasicCriteria { common, search_source: SearchSource::Interactive })
    };

    if !criteria.is_valid() {
        return Err(OrchestratorError::ValidationError {
            field: "episode".to_string(),
            message: "an episode number requires a season number".to_string(),
        });
    }
    Ok(criteria)
}

async fn run_search(
    config: &AppConfig,
    query: String,
    movie: bool,
    season: Option<u32>,
    episode: Option<u32>,
) -> Result<()> {
    let criteria = build_criteria(query, movie, season, episode)?;

    let health = Arc::new(HealthTracker::new());
    let rate_limiter = Arc::new(RateLimitGovernor::new(config.search.default_requests_per_minute));
    let indexers = demo_fixtures::bundled_indexers();

    for (indexer, _) in &indexers {
        health.register(indexer.id, indexer.id);
    }

    let orchestrator = SearchOrchestrator::new(health, rate_limiter);
    let options = SearchOptions {
        concurrency: config.search.concurrency,
        timeout: Duration::from_secs(config.search.timeout_secs),
        use_tiered_search: config.search.use_tiered_search,
        ..SearchOptions::default()
    };
    let profile = ScoringProfile::default();

    let result = orchestrator.search_enhanced(&indexers, &criteria, &options, &profile).await;

    println!(
        "found {} raw, {} after dedup, {} after filtering, {} after enrichment ({} rejected)",
        result.total_results,
        result.after_dedup,
        result.after_filtering,
        result.after_enrichment,
        result.rejected_count
    );

    for release in result.releases.iter().take(10) {
        println!(
            "  [{}] {} (score={}, rejected={})",
            release.release_weight.unwrap_or(0),
            release.raw().title,
            release.score,
            release.rejected
        );
    }

    if let Some(best) = result.releases.iter().find(|r| !r.rejected) {
        let mut dispatcher = DownloadDispatcher::new();
        let qbit_config = QBittorrentConfig {
            base_url: config.qbittorrent.base_url.clone(),
            username: config.qbittorrent.username.clone(),
            password: config.qbittorrent.password.clone(),
            timeout: config.qbittorrent.timeout_secs,
        };
        if let Ok(client) = QBittorrentClient::new(qbit_config) {
            dispatcher.register_client(Arc::new(client));
        }

        let grab_request = GrabRequest {
            title: best.raw().title.clone(),
            locator: best.raw().locator.clone(),
            info_hash: best.raw().info_hash.clone(),
            indexer_id: Some(best.raw().indexer_id),
            protocol: best.raw().protocol,
            target_content_type: orchestrator_core::model::ContentType::Movie,
            categories: best.raw().categories.clone(),
            is_automatic: false,
            force: false,
            category: Some("demo".to_string()),
            seed_ratio_limit: None,
            seed_time_limit_minutes: None,
        };

        info!(title = %grab_request.title, "dispatching top candidate");
        match dispatcher.grab(grab_request).await {
            Ok(response) => println!("queued {} via {} (hash={})", response.queue_id, response.client_name, response.hash),
            Err(e) => println!("grab failed: {e}"),
        }
    }

    Ok(())
}
