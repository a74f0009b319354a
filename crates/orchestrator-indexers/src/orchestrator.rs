//! Search Orchestrator (C6). The heart of the system: criteria
//! enrichment, indexer eligibility filtering, tiered ID-then-text
//! search, bounded concurrency, dedup, and ranking. Grounded on
//! `indexers/src/multi_indexer.rs::MultiIndexerService`, expanded from
//! its single `search_all`/`aggregate_results` pair into the full
//! pipeline in the spec.

use crate::capability::{can_handle_search_type, supports_search_source, IneligibilityReason};
use crate::health::HealthTracker;
use crate::rate_limit::RateLimitGovernor;
use chrono::Utc;
use futures::future::join_all;
use orchestrator_core::cache::Cache;
use orchestrator_core::model::{
    category_content_type, ContentType, EnhancedReleaseResult, EpisodeFormat, IndexerCapabilities,
    IndexerInstance, MovieFormat, Protocol, ReleaseResult, ReleaseView, SearchCriteria, SearchParam,
};
use orchestrator_core::{IndexerAdapter, MetadataResolver};
use orchestrator_decision::{deduplicate, deduplicate_enhanced, enrich, EnrichmentOptions, ScoringProfile};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub respect_enabled: bool,
    pub respect_backoff: bool,
    pub use_tiered_search: bool,
    pub concurrency: usize,
    pub timeout: Duration,
    pub use_cache: bool,
    pub min_seeders: Option<u32>,
    pub max_size_bytes: Option<u64>,
    pub protocol_filter: Option<HashSet<Protocol>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            respect_enabled: true,
            respect_backoff: true,
            use_tiered_search: true,
            concurrency: 5,
            timeout: Duration::from_secs(30),
            use_cache: true,
            min_seeders: None,
            max_size_bytes: None,
            protocol_filter: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndexerOutcome {
    pub indexer_id: i32,
    pub indexer_name: String,
    pub result_count: usize,
    pub search_time_ms: u64,
    pub error: Option<String>,
    pub search_method: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct RejectedIndexer {
    pub indexer_id: i32,
    pub reason: IneligibilityReason,
}

pub struct SearchResult {
    pub releases: Vec<ReleaseResult>,
    pub total_results: usize,
    pub after_dedup: usize,
    pub search_time_ms: u64,
    pub from_cache: bool,
    pub outcomes: Vec<IndexerOutcome>,
    pub rejected_indexers: Vec<RejectedIndexer>,
}

pub struct EnhancedSearchResult {
    pub releases: Vec<EnhancedReleaseResult>,
    pub total_results: usize,
    pub after_dedup: usize,
    pub after_filtering: usize,
    pub after_enrichment: usize,
    pub rejected_count: usize,
    pub search_time_ms: u64,
    pub enrich_time_ms: u64,
    pub outcomes: Vec<IndexerOutcome>,
    pub rejected_indexers: Vec<RejectedIndexer>,
}

pub struct SearchOrchestrator {
    health: Arc<HealthTracker>,
    rate_limiter: Arc<RateLimitGovernor>,
    cache: Cache<String, Vec<ReleaseResult>>,
    metadata_resolver: Option<Arc<dyn MetadataResolver>>,
    /// Episode-count hints fetched via `MetadataResolver`, keyed by
    /// `(tmdbId, season)` — `season = None` holds the series aggregate.
    /// Kept in-memory only, for the orchestrator instance's lifetime.
    episode_count_cache: Mutex<HashMap<(i64, Option<u32>), u32>>,
}

impl SearchOrchestrator {
    pub fn new(health: Arc<HealthTracker>, rate_limiter: Arc<RateLimitGovernor>) -> Self {
        Self {
            health,
            rate_limiter,
            cache: Cache::new(Duration::from_secs(30)),
            metadata_resolver: None,
            episode_count_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_metadata_resolver(mut self, resolver: Arc<dyn MetadataResolver>) -> Self {
        self.metadata_resolver = Some(resolver);
        self
    }

    /// Step 1 of §4.6: when a `tmdbId` is known but `imdbId` (and, for TV,
    /// `tvdbId`) is missing, resolve them via the metadata resolver. The
    /// original `searchSource` and all other fields are preserved.
    async fn enrich_criteria(&self, criteria: SearchCriteria) -> SearchCriteria {
        let Some(resolver) = &self.metadata_resolver else {
            return criteria;
        };

        match criteria {
            SearchCriteria::Movie(mut movie) => {
                if let (Some(tmdb_id), None) = (movie.tmdb_id, &movie.imdb_id) {
                    if let Ok(Some(imdb_id)) = resolver.get_movie_external_ids(tmdb_id).await {
                        movie.imdb_id = Some(imdb_id);
                    }
                }
                SearchCriteria::Movie(movie)
            }
            SearchCriteria::Tv(mut tv) => {
                if let Some(tmdb_id) = tv.tmdb_id {
                    if tv.imdb_id.is_none() || tv.tvdb_id.is_none() {
                        if let Ok(ids) = resolver.get_tv_external_ids(tmdb_id).await {
                            if tv.imdb_id.is_none() {
                                tv.imdb_id = ids.imdb_id;
                            }
                            if tv.tvdb_id.is_none() {
                                tv.tvdb_id = ids.tvdb_id;
                            }
                        }
                    }
                }
                SearchCriteria::Tv(tv)
            }
            other => other,
        }
    }

    /// Step 9 of §4.6: the per-season (or series-aggregate, when
    /// `season` is `None`) episode count, fetched via the metadata
    /// resolver on first request and cached thereafter.
    async fn episode_count_hint(&self, tmdb_id: Option<i64>, season: Option<u32>) -> Option<u32> {
        let tmdb_id = tmdb_id?;
        let resolver = self.metadata_resolver.as_ref()?;

        {
            let cache = self.episode_count_cache.lock().await;
            if let Some(&count) = cache.get(&(tmdb_id, season)) {
                return Some(count);
            }
        }

        let count = match season {
            Some(season_number) => resolver.get_season(tmdb_id, season_number).await.ok().map(|s| s.episode_count),
            None => resolver.get_tv_show(tmdb_id).await.ok().map(|s| s.number_of_episodes),
        }?;

        self.episode_count_cache.lock().await.insert((tmdb_id, season), count);
        Some(count)
    }

    fn fingerprint(criteria: &SearchCriteria) -> String {
        let common = criteria.common();
        format!(
            "{}|{:?}|{:?}|{:?}",
            criteria.kind(),
            common.query,
            common.search_titles,
            common.indexer_ids
        )
    }

    fn eligible_indexers<'a>(
        &self,
        indexers: &'a [(IndexerInstance, Arc<dyn IndexerAdapter>)],
        criteria: &SearchCriteria,
        options: &SearchOptions,
    ) -> (Vec<&'a (IndexerInstance, Arc<dyn IndexerAdapter>)>, Vec<RejectedIndexer>) {
        let now = Utc::now();
        let mut eligible = Vec::new();
        let mut rejected = Vec::new();

        for entry @ (indexer, adapter) in indexers {
            if !can_handle_search_type(adapter.capabilities(), criteria) {
                rejected.push(RejectedIndexer { indexer_id: indexer.id, reason: IneligibilityReason::SearchType });
                continue;
            }
            if !supports_search_source(indexer, criteria) {
                rejected.push(RejectedIndexer { indexer_id: indexer.id, reason: IneligibilityReason::SearchSource });
                continue;
            }
            if options.respect_enabled && !self.health.get_status(indexer.id).map(|s| s.is_enabled).unwrap_or(true) {
                rejected.push(RejectedIndexer { indexer_id: indexer.id, reason: IneligibilityReason::Disabled });
                continue;
            }
            if options.respect_backoff && !self.health.can_use(indexer.id, now) {
                rejected.push(RejectedIndexer { indexer_id: indexer.id, reason: IneligibilityReason::Backoff });
                continue;
            }
            if let Some(allowlist) = &criteria.common().indexer_ids {
                if !allowlist.contains(&indexer.id) {
                    rejected.push(RejectedIndexer { indexer_id: indexer.id, reason: IneligibilityReason::IndexerFilter });
                    continue;
                }
            }
            if let Some(allowed_protocols) = &options.protocol_filter {
                if !allowed_protocols.contains(&indexer.protocol) {
                    rejected.push(RejectedIndexer { indexer_id: indexer.id, reason: IneligibilityReason::Protocol });
                    continue;
                }
            }
            eligible.push(entry);
        }

        eligible.sort_by_key(|(indexer, _)| {
            self.health.get_status(indexer.id).map(|s| s.priority).unwrap_or(indexer.id)
        });

        (eligible, rejected)
    }

    #[instrument(skip(self, indexers, criteria))]
    async fn dispatch(
        &self,
        indexers: &[&(IndexerInstance, Arc<dyn IndexerAdapter>)],
        criteria: &SearchCriteria,
        options: &SearchOptions,
    ) -> (Vec<ReleaseResult>, Vec<IndexerOutcome>) {
        let mut all_releases = Vec::new();
        let mut outcomes = Vec::new();

        for batch in indexers.chunks(options.concurrency.max(1)) {
            let futures = batch.iter().map(|(indexer, adapter)| {
                self.run_one_indexer(indexer, adapter.clone(), criteria, options)
            });
            let batch_results = join_all(futures).await;
            for (releases, outcome) in batch_results {
                all_releases.extend(releases);
                outcomes.push(outcome);
            }
        }

        (all_releases, outcomes)
    }

    async fn run_one_indexer(
        &self,
        indexer: &IndexerInstance,
        adapter: Arc<dyn IndexerAdapter>,
        criteria: &SearchCriteria,
        options: &SearchOptions,
    ) -> (Vec<ReleaseResult>, IndexerOutcome) {
        let started = Instant::now();
        let decision = self
            .rate_limiter
            .check_rate_limits(indexer.id, &indexer.base_url, indexer.requests_per_minute)
            .await;

        if !decision.can_proceed && decision.wait_time_ms > options.timeout.as_millis() as u64 {
            return (
                vec![],
                IndexerOutcome {
                    indexer_id: indexer.id,
                    indexer_name: indexer.name.clone(),
                    result_count: 0,
                    search_time_ms: started.elapsed().as_millis() as u64,
                    error: Some(format!("rate limited: {}", decision.reason.unwrap_or_default())),
                    search_method: None,
                },
            );
        }

        if decision.wait_time_ms > 0 {
            tokio::time::sleep(Duration::from_millis(decision.wait_time_ms)).await;
        }

        let search_future = self.search_with_tiering(&adapter, criteria, options.use_tiered_search);
        let outcome = tokio::time::timeout(options.timeout, search_future).await;

        self.rate_limiter.record_request(indexer.id, &indexer.base_url).await;

        match outcome {
            Ok(Ok((releases, method))) => {
                self.health.record_success(indexer.id);
                let count = releases.len();
                let releases = releases
                    .into_iter()
                    .map(|mut r| {
                        r.indexer_priority = self.health.get_status(indexer.id).map(|s| s.priority).unwrap_or(25);
                        r
                    })
                    .collect();
                (
                    releases,
                    IndexerOutcome {
                        indexer_id: indexer.id,
                        indexer_name: indexer.name.clone(),
                        result_count: count,
                        search_time_ms: started.elapsed().as_millis() as u64,
                        error: None,
                        search_method: Some(method),
                    },
                )
            }
            Ok(Err(err)) => {
                self.health.record_failure(indexer.id);
                warn!(indexer_id = indexer.id, %err, "indexer search failed");
                (
                    vec![],
                    IndexerOutcome {
                        indexer_id: indexer.id,
                        indexer_name: indexer.name.clone(),
                        result_count: 0,
                        search_time_ms: started.elapsed().as_millis() as u64,
                        error: Some(err.to_string()),
                        search_method: None,
                    },
                )
            }
            Err(_) => {
                self.health.record_failure(indexer.id);
                (
                    vec![],
                    IndexerOutcome {
                        indexer_id: indexer.id,
                        indexer_name: indexer.name.clone(),
                        result_count: 0,
                        search_time_ms: started.elapsed().as_millis() as u64,
                        error: Some("timeout".to_string()),
                        search_method: None,
                    },
                )
            }
        }
    }

    /// §4.6.1: ID tier (ID-only criteria, gated on capability support) then
    /// text tier (multi-title, multi-format-variant, deduped by guid).
    async fn search_with_tiering(
        &self,
        adapter: &Arc<dyn IndexerAdapter>,
        criteria: &SearchCriteria,
        use_tiered_search: bool,
    ) -> orchestrator_core::Result<(Vec<ReleaseResult>, &'static str)> {
        if !use_tiered_search {
            return adapter.search(criteria).await.map(|r| (r, "single"));
        }

        let caps = adapter.capabilities();
        if has_searchable_ids(criteria) && supports_any_id_param(caps, criteria) {
            let id_criteria = id_only_criteria(criteria);
            let id_results = adapter.search(&id_criteria).await.unwrap_or_default();
            if !id_results.is_empty() {
                return Ok((id_results, "id"));
            }
            let common = criteria.common();
            if common.query.is_none() && common.search_titles.is_empty() {
                return Ok((vec![], "id"));
            }
            debug!("id tier empty, falling back to text tier");
        }

        self.search_text_variants(adapter, criteria).await
    }

    async fn search_text_variants(
        &self,
        adapter: &Arc<dyn IndexerAdapter>,
        criteria: &SearchCriteria,
    ) -> orchestrator_core::Result<(Vec<ReleaseResult>, &'static str)> {
        let titles = criteria.titles_to_try();
        if titles.is_empty() {
            return adapter.search(criteria).await.map(|r| (r, "text"));
        }

        let caps = adapter.capabilities();
        let mut seen_guids = HashSet::new();
        let mut collected = Vec::new();
        let mut any_succeeded = false;
        let mut last_error = None;

        for title in &titles {
            let variants = text_variants_for_title(criteria, caps, title);
            for variant in variants {
                match adapter.search(&variant).await {
                    Ok(releases) => {
                        any_succeeded = true;
                        for release in releases {
                            if seen_guids.insert(release.guid.clone()) {
                                collected.push(release);
                            }
                        }
                    }
                    Err(err) => last_error = Some(err),
                }
            }
        }

        if !any_succeeded {
            if let Some(err) = last_error {
                return Err(err);
            }
        }

        Ok((collected, "text"))
    }

    /// Plain search: consults and populates the cache, no scoring.
    pub async fn search(
        &self,
        indexers: &[(IndexerInstance, Arc<dyn IndexerAdapter>)],
        criteria: &SearchCriteria,
        options: &SearchOptions,
    ) -> SearchResult {
        let started = Instant::now();
        let criteria = self.enrich_criteria(criteria.clone()).await;
        let criteria = &criteria;
        let fingerprint = Self::fingerprint(criteria);

        if options.use_cache {
            if let Some(cached) = self.cache.get(&fingerprint) {
                let total = cached.len();
                return SearchResult {
                    releases: cached,
                    total_results: total,
                    after_dedup: total,
                    search_time_ms: started.elapsed().as_millis() as u64,
                    from_cache: true,
                    outcomes: vec![],
                    rejected_indexers: vec![],
                };
            }
        }

        let (eligible, rejected_indexers) = self.eligible_indexers(indexers, criteria, options);
        let (raw_releases, outcomes) = self.dispatch(&eligible, criteria, options).await;
        let total_results = raw_releases.len();

        let views: Vec<ReleaseView> = raw_releases
            .into_iter()
            .map(|raw| {
                let parsed = orchestrator_parser::parse_release(&raw.title);
                ReleaseView { raw, parsed }
            })
            .collect();
        let deduped = deduplicate(views);
        let after_dedup = deduped.len();
        let releases: Vec<ReleaseResult> = deduped.into_iter().map(|v| v.raw).collect();

        if options.use_cache {
            self.cache.set(fingerprint, releases.clone());
        }

        SearchResult {
            releases,
            total_results,
            after_dedup,
            search_time_ms: started.elapsed().as_millis() as u64,
            from_cache: false,
            outcomes,
            rejected_indexers,
        }
    }

    /// Enhanced search: parses, filters, scores, dedups pass 2, ranks.
    /// Never reads or writes the cache (a changed scoring profile would
    /// make a cached answer stale).
    pub async fn search_enhanced(
        &self,
        indexers: &[(IndexerInstance, Arc<dyn IndexerAdapter>)],
        criteria: &SearchCriteria,
        options: &SearchOptions,
        profile: &ScoringProfile,
    ) -> EnhancedSearchResult {
        let started = Instant::now();
        let criteria = self.enrich_criteria(criteria.clone()).await;
        let criteria = &criteria;
        let (eligible, rejected_indexers) = self.eligible_indexers(indexers, criteria, options);
        let (raw_releases, outcomes) = self.dispatch(&eligible, criteria, options).await;
        let total_results = raw_releases.len();

        let views: Vec<ReleaseView> = raw_releases
            .into_iter()
            .map(|raw| {
                let parsed = orchestrator_parser::parse_release(&raw.title);
                ReleaseView { raw, parsed }
            })
            .collect();
        let deduped = deduplicate(views);
        let after_dedup = deduped.len();

        let filtered = apply_hard_filters(deduped, criteria);
        let after_filtering = filtered.len();

        let episode_count_hint = match criteria {
            SearchCriteria::Tv(tv) => self.episode_count_hint(tv.tmdb_id, tv.season).await,
            _ => None,
        };

        let enrich_started = Instant::now();
        let enrichment_options = EnrichmentOptions {
            min_seeders: options.min_seeders,
            max_size_bytes: options.max_size_bytes,
            episode_count_hint,
            filter_rejected: false,
        };
        let outcome = enrich(filtered, profile, &enrichment_options);
        let enrich_time_ms = enrich_started.elapsed().as_millis() as u64;

        let deduped2 = deduplicate_enhanced(outcome.releases);
        let after_enrichment = deduped2.iter().filter(|r| !r.rejected).count();

        let mut ranked = deduped2;
        ranked.sort_by(|a, b| {
            a.rejected
                .cmp(&b.rejected)
                .then(b.score.cmp(&a.score))
                .then(a.raw().indexer_priority.cmp(&b.raw().indexer_priority))
                .then(b.raw().seeders.unwrap_or(0).cmp(&a.raw().seeders.unwrap_or(0)))
        });
        for (idx, release) in ranked.iter_mut().enumerate() {
            release.release_weight = Some(idx + 1);
        }

        EnhancedSearchResult {
            releases: ranked,
            total_results,
            after_dedup,
            after_filtering,
            after_enrichment,
            rejected_count: outcome.rejected_count,
            search_time_ms: started.elapsed().as_millis() as u64,
            enrich_time_ms,
            outcomes,
            rejected_indexers,
        }
    }
}

fn apply_hard_filters(views: Vec<ReleaseView>, criteria: &SearchCriteria) -> Vec<ReleaseView> {
    views
        .into_iter()
        .filter(|view| {
            let shape_ok = match criteria {
                SearchCriteria::Movie(_) => {
                    view.parsed.episode.is_none() && category_matches(view, ContentType::Movie)
                }
                SearchCriteria::Tv(tv) => {
                    view.parsed.episode.is_some()
                        && category_matches(view, ContentType::Tv)
                        && season_episode_policy(view, tv)
                }
                SearchCriteria::Basic(_) => true,
            };
            shape_ok && title_relevance_ok(view, criteria)
        })
        .collect()
}

/// §4.6 step 8, title relevance: for non-`basic` searches, reject releases
/// whose extracted name shares no normalized lower-alnum substring with any
/// reference title (`query` ∪ `searchTitles`). No reference title means the
/// filter is skipped entirely.
fn title_relevance_ok(view: &ReleaseView, criteria: &SearchCriteria) -> bool {
    if matches!(criteria, SearchCriteria::Basic(_)) {
        return true;
    }

    let common = criteria.common();
    let mut references = common.search_titles.clone();
    if let Some(query) = &common.query {
        references.push(query.clone());
    }
    if references.is_empty() {
        return true;
    }

    let normalized_clean = normalize_for_relevance(&view.parsed.clean_title);
    references.iter().any(|reference| {
        let normalized_reference = normalize_for_relevance(reference);
        !normalized_reference.is_empty()
            && (normalized_clean.contains(&normalized_reference) || normalized_reference.contains(&normalized_clean))
    })
}

fn normalize_for_relevance(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).flat_map(|c| c.to_lowercase()).collect()
}

fn category_matches(view: &ReleaseView, expected: ContentType) -> bool {
    view.raw
        .categories
        .first()
        .map(|&id| category_content_type(id) == expected)
        .unwrap_or(true)
}

fn season_episode_policy(view: &ReleaseView, tv: &orchestrator_core::model::TvCriteria) -> bool {
    use orchestrator_core::model::SearchSource;
    let interactive = tv.search_source == SearchSource::Interactive;
    let episode_info = match &view.parsed.episode {
        Some(e) => e,
        None => return false,
    };

    match (tv.season, tv.episode) {
        (Some(target_season), None) => {
            episode_info.is_season_pack
                && !episode_info.is_complete_series
                && episode_info.seasons.len() <= 1
                && episode_info.season == Some(target_season)
        }
        (Some(target_season), Some(target_episode)) => {
            if episode_info.is_season_pack {
                !interactive && episode_info.season == Some(target_season)
            } else {
                episode_info.season == Some(target_season) && episode_info.episodes.contains(&target_episode)
            }
        }
        (None, Some(target_episode)) => {
            if episode_info.is_season_pack {
                !interactive
            } else {
                episode_info.episodes.contains(&target_episode)
            }
        }
        (None, None) => true,
    }
}

fn has_searchable_ids(criteria: &SearchCriteria) -> bool {
    match criteria {
        SearchCriteria::Movie(c) => c.imdb_id.is_some() || c.tmdb_id.is_some(),
        SearchCriteria::Tv(c) => {
            c.imdb_id.is_some() || c.tmdb_id.is_some() || c.tvdb_id.is_some() || c.tvmaze_id.is_some()
        }
        SearchCriteria::Basic(_) => false,
    }
}

fn supports_any_id_param(caps: &IndexerCapabilities, criteria: &SearchCriteria) -> bool {
    match criteria {
        SearchCriteria::Movie(c) => {
            (c.imdb_id.is_some() && caps.supports_param(false, SearchParam::ImdbId))
                || (c.tmdb_id.is_some() && caps.supports_param(false, SearchParam::TmdbId))
        }
        SearchCriteria::Tv(c) => {
            (c.imdb_id.is_some() && caps.supports_param(true, SearchParam::ImdbId))
                || (c.tmdb_id.is_some() && caps.supports_param(true, SearchParam::TmdbId))
                || (c.tvdb_id.is_some() && caps.supports_param(true, SearchParam::TvdbId))
                || (c.tvmaze_id.is_some() && caps.supports_param(true, SearchParam::TvMazeId))
        }
        SearchCriteria::Basic(_) => false,
    }
}

/// Clears the free-text fields, leaving only the structured ID fields, so
/// the ID tier never accidentally falls back to a keyword match.
fn id_only_criteria(criteria: &SearchCriteria) -> SearchCriteria {
    let mut criteria = criteria.clone();
    match &mut criteria {
        SearchCriteria::Movie(c) => {
            c.common.query = None;
            c.common.search_titles.clear();
        }
        SearchCriteria::Tv(c) => {
            c.common.query = None;
            c.common.search_titles.clear();
        }
        SearchCriteria::Basic(c) => {
            c.common.query = None;
            c.common.search_titles.clear();
        }
    }
    criteria
}

fn episode_format_token(format: EpisodeFormat) -> String {
    match format {
        EpisodeFormat::Standard => "standard".to_string(),
        EpisodeFormat::European => "european".to_string(),
        EpisodeFormat::Compact => "compact".to_string(),
    }
}

/// §4.6.1 text-tier variant fan-out for a single title: TV-with-season
/// iterates episode formats, movie iterates format variants (deduped on
/// `(query, year)`), everything else is a single plain-query request.
fn text_variants_for_title(criteria: &SearchCriteria, caps: &IndexerCapabilities, title: &str) -> Vec<SearchCriteria> {
    match criteria {
        SearchCriteria::Tv(tv) if tv.season.is_some() => caps
            .effective_episode_formats()
            .into_iter()
            .map(|format| {
                let mut c = tv.clone();
                c.common.query = Some(title.to_string());
                c.preferred_episode_format = Some(episode_format_token(format));
                SearchCriteria::Tv(c)
            })
            .collect(),
        SearchCriteria::Movie(movie) => {
            let mut seen = HashSet::new();
            caps.effective_movie_formats()
                .into_iter()
                .filter_map(|format| {
                    let mut c = movie.clone();
                    match format {
                        MovieFormat::Standard => {
                            c.common.query = Some(title.to_string());
                        }
                        MovieFormat::NoYear => {
                            c.common.query = Some(title.to_string());
                            c.year = None;
                        }
                        MovieFormat::YearOnly => {
                            c.common.query = Some(movie.year?.to_string());
                            c.year = None;
                        }
                    }
                    let key = (c.common.query.clone(), c.year);
                    seen.insert(key).then(|| SearchCriteria::Movie(c))
                })
                .collect()
        }
        _ => {
            let mut c = criteria.clone();
            match &mut c {
                SearchCriteria::Basic(b) => b.common.query = Some(title.to_string()),
                SearchCriteria::Tv(t) => t.common.query = Some(title.to_string()),
                SearchCriteria::Movie(m) => m.common.query = Some(title.to_string()),
            }
            vec![c]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestrator_core::model::{EpisodeInfo, ParsedRelease};

    fn view_with_episode(episode: EpisodeInfo) -> ReleaseView {
        ReleaseView {
            raw: orchestrator_core::model::ReleaseResult {
                guid: "g".into(),
                title: "t".into(),
                indexer_id: 1,
                indexer_name: "i".into(),
                indexer_priority: 25,
                protocol: orchestrator_core::model::Protocol::Torrent,
                published_at: None,
                size: None,
                categories: vec![5030],
                locator: orchestrator_core::model::DownloadLocator::MagnetUrl("m".into()),
                info_hash: None,
                seeders: Some(10),
                leechers: None,
            },
            parsed: ParsedRelease {
                episode: Some(episode),
                ..ParsedRelease::empty("Show")
            },
        }
    }

    #[test]
    fn season_only_keeps_single_season_pack() {
        let tv = orchestrator_core::model::TvCriteria {
            common: Default::default(),
            imdb_id: None,
            tmdb_id: None,
            tvdb_id: None,
            tvmaze_id: None,
            season: Some(1),
            episode: None,
            preferred_episode_format: None,
            search_source: orchestrator_core::model::SearchSource::Automatic,
        };
        let pack = view_with_episode(EpisodeInfo {
            season: Some(1),
            episodes: vec![],
            seasons: vec![],
            absolute_episode: None,
            air_date: None,
            is_season_pack: true,
            is_complete_series: false,
            is_daily: false,
        });
        assert!(season_episode_policy(&pack, &tv));

        let multi_season = view_with_episode(EpisodeInfo {
            season: Some(1),
            episodes: vec![],
            seasons: vec![1, 2, 3],
            absolute_episode: None,
            air_date: None,
            is_season_pack: true,
            is_complete_series: false,
            is_daily: false,
        });
        assert!(!season_episode_policy(&multi_season, &tv));
    }

    #[test]
    fn interactive_episode_search_rejects_season_packs() {
        let tv = orchestrator_core::model::TvCriteria {
            common: Default::default(),
            imdb_id: None,
            tmdb_id: None,
            tvdb_id: None,
            tvmaze_id: None,
            season: Some(1),
            episode: Some(1),
            preferred_episode_format: None,
            search_source: orchestrator_core::model::SearchSource::Interactive,
        };
        let pack = view_with_episode(EpisodeInfo {
            season: Some(1),
            episodes: vec![],
            seasons: vec![],
            absolute_episode: None,
            air_date: None,
            is_season_pack: true,
            is_complete_series: false,
            is_daily: false,
        });
        assert!(!season_episode_policy(&pack, &tv));

        let episode = view_with_episode(EpisodeInfo {
            season: Some(1),
            episodes: vec![1],
            seasons: vec![],
            absolute_episode: None,
            air_date: None,
            is_season_pack: false,
            is_complete_series: false,
            is_daily: false,
        });
        assert!(season_episode_policy(&episode, &tv));
    }
}
