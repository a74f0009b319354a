//! Enricher / scorer (C7). Combines `ScoringProfile::score` with
//! protocol-specific rejection rules grounded on the hard-constraint
//! checks in `decision/src/engine.rs::meets_constraints`, generalized
//! from engine-level constants to profile-carried parameters.

use crate::profile::ScoringProfile;
use orchestrator_core::model::{Protocol, RejectionCode, ReleaseView};
use orchestrator_core::model::EnhancedReleaseResult;

#[derive(Debug, Clone, Default)]
pub struct EnrichmentOptions {
    pub min_seeders: Option<u32>,
    /// Per-episode size bound. For season packs this is scaled by
    /// `episode_count_hint` before being compared against the pack's size.
    pub max_size_bytes: Option<u64>,
    /// Episode count for the target season (or series aggregate),
    /// resolved via `MetadataResolver` by the caller.
    pub episode_count_hint: Option<u32>,
    pub filter_rejected: bool,
}

pub struct EnrichmentOutcome {
    pub releases: Vec<EnhancedReleaseResult>,
    pub rejected_count: usize,
}

pub fn enrich(
    views: Vec<ReleaseView>,
    profile: &ScoringProfile,
    options: &EnrichmentOptions,
) -> EnrichmentOutcome {
    let mut rejected_count = 0;
    let mut results: Vec<EnhancedReleaseResult> = views
        .into_iter()
        .map(|view| {
            let mut reasons = Vec::new();

            if !profile.is_protocol_allowed(view.raw.protocol) {
                reasons.push(RejectionCode::CategoryMismatch);
            }

            if view.raw.protocol == Protocol::Torrent {
                let seeders = view.raw.seeders.unwrap_or(0);
                let min_seeders = options.min_seeders.unwrap_or(1);
                if seeders == 0 {
                    reasons.push(RejectionCode::DeadTorrent);
                } else if seeders < min_seeders {
                    reasons.push(RejectionCode::MinSeeders);
                }
            }

            let is_season_pack = view.parsed.episode.as_ref().map(|e| e.is_season_pack).unwrap_or(false);
            let effective_max_size = match (options.max_size_bytes, options.episode_count_hint) {
                (Some(max), Some(count)) if is_season_pack && count > 0 => Some(max * count as u64),
                (max, _) => max,
            };
            if let (Some(size), Some(max_size)) = (view.raw.size, effective_max_size) {
                if size > max_size {
                    reasons.push(RejectionCode::SizeOutOfBounds);
                }
            }

            if !profile.allows_resolution(view.parsed.resolution) {
                reasons.push(RejectionCode::BelowMinScore);
            }

            let score = profile.score(&view.parsed);
            if let Some(min_score) = profile.min_score {
                if score < min_score && !reasons.contains(&RejectionCode::BelowMinScore) {
                    reasons.push(RejectionCode::BelowMinScore);
                }
            }

            let rejected = !reasons.is_empty();
            if rejected {
                rejected_count += 1;
            }

            EnhancedReleaseResult {
                view,
                score,
                rejected,
                rejection_reasons: reasons,
                release_weight: None,
            }
        })
        .collect();

    results.sort_by(|a, b| a.rejected.cmp(&b.rejected).then(b.score.cmp(&a.score)));

    if options.filter_rejected {
        results.retain(|r| !r.rejected);
    }

    EnrichmentOutcome {
        releases: results,
        rejected_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestrator_core::model::{DownloadLocator, ParsedRelease, ReleaseResult};

    fn view(seeders: Option<u32>, size: Option<u64>) -> ReleaseView {
        ReleaseView {
            raw: ReleaseResult {
                guid: "g".to_string(),
                title: "Show S01E01 1080p".to_string(),
                indexer_id: 1,
                indexer_name: "test".to_string(),
                indexer_priority: 25,
                protocol: Protocol::Torrent,
                published_at: None,
                size,
                categories: vec![5030],
                locator: DownloadLocator::MagnetUrl("magnet:?xt=urn:btih:abc".to_string()),
                info_hash: Some("abc".to_string()),
                seeders,
                leechers: Some(0),
            },
            parsed: ParsedRelease::empty("Show"),
        }
    }

    #[test]
    fn zero_seeders_is_rejected_as_dead() {
        let outcome = enrich(vec![view(Some(0), Some(100))], &ScoringProfile::default(), &EnrichmentOptions::default());
        assert!(outcome.releases[0].rejected);
        assert!(outcome.releases[0].rejection_reasons.contains(&RejectionCode::DeadTorrent));
    }

    #[test]
    fn oversized_release_is_rejected() {
        let options = EnrichmentOptions {
            max_size_bytes: Some(50),
            ..Default::default()
        };
        let outcome = enrich(vec![view(Some(10), Some(100))], &ScoringProfile::default(), &options);
        assert!(outcome.releases[0].rejected);
    }

    #[test]
    fn season_pack_size_bound_scales_with_episode_count_hint() {
        let mut pack = view(Some(10), Some(450));
        pack.parsed.episode = Some(orchestrator_core::model::EpisodeInfo {
            is_season_pack: true,
            ..Default::default()
        });
        let options = EnrichmentOptions {
            max_size_bytes: Some(50),
            episode_count_hint: Some(10),
            ..Default::default()
        };
        let outcome = enrich(vec![pack], &ScoringProfile::default(), &options);
        assert!(!outcome.releases[0].rejected);
    }

    #[test]
    fn accepted_releases_sort_first() {
        let options = EnrichmentOptions::default();
        let outcome = enrich(
            vec![view(Some(0), Some(10)), view(Some(10), Some(10))],
            &ScoringProfile::default(),
            &options,
        );
        assert!(!outcome.releases[0].rejected);
        assert!(outcome.releases[1].rejected);
    }
}
