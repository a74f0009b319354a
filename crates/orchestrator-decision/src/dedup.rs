//! Two-pass deduplication. Pass 1 mirrors
//! `indexers/src/multi_indexer.rs::deduplicate_results`'s infoHash-then-
//! normalized-title strategy; pass 2 generalizes its "replace with
//! better result" comparator into the documented four-key order.

use orchestrator_core::model::{EnhancedReleaseResult, ReleaseView};
use std::collections::HashMap;

fn normalize_title_key(view: &ReleaseView) -> String {
    format!(
        "{}|{:?}|{:?}|{:?}|{:?}",
        view.parsed.clean_title.to_lowercase(),
        view.parsed.resolution,
        view.parsed.source,
        view.parsed.codec,
        view.parsed.release_group.as_deref().unwrap_or("").to_lowercase(),
    )
}

fn dedup_key(view: &ReleaseView) -> String {
    view.raw
        .info_hash
        .clone()
        .unwrap_or_else(|| normalize_title_key(view))
}

/// Pass 1: within a dedup group, prefer higher seeders, then larger
/// size, then the lexicographically smaller guid as a stable tiebreak.
pub fn deduplicate(views: Vec<ReleaseView>) -> Vec<ReleaseView> {
    let mut best: HashMap<String, ReleaseView> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for view in views {
        let key = dedup_key(&view);
        match best.get(&key) {
            None => {
                order.push(key.clone());
                best.insert(key, view);
            }
            Some(existing) => {
                if is_better_pass1(&view, existing) {
                    best.insert(key, view);
                }
            }
        }
    }

    order.into_iter().filter_map(|k| best.remove(&k)).collect()
}

fn is_better_pass1(candidate: &ReleaseView, existing: &ReleaseView) -> bool {
    let c_seeders = candidate.raw.seeders.unwrap_or(0);
    let e_seeders = existing.raw.seeders.unwrap_or(0);
    if c_seeders != e_seeders {
        return c_seeders > e_seeders;
    }
    let c_size = candidate.raw.size.unwrap_or(0);
    let e_size = existing.raw.size.unwrap_or(0);
    if c_size != e_size {
        return c_size > e_size;
    }
    candidate.raw.guid < existing.raw.guid
}

/// Pass 2: prefer fewer rejections, then higher score, then lower
/// (better) indexer priority, then higher seeders.
pub fn deduplicate_enhanced(releases: Vec<EnhancedReleaseResult>) -> Vec<EnhancedReleaseResult> {
    let mut best: HashMap<String, EnhancedReleaseResult> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for release in releases {
        let key = dedup_key(&release.view);
        match best.get(&key) {
            None => {
                order.push(key.clone());
                best.insert(key, release);
            }
            Some(existing) => {
                if is_better_pass2(&release, existing) {
                    best.insert(key, release);
                }
            }
        }
    }

    order.into_iter().filter_map(|k| best.remove(&k)).collect()
}

fn is_better_pass2(candidate: &EnhancedReleaseResult, existing: &EnhancedReleaseResult) -> bool {
    let c_rejections = candidate.rejection_reasons.len();
    let e_rejections = existing.rejection_reasons.len();
    if c_rejections != e_rejections {
        return c_rejections < e_rejections;
    }
    if candidate.score != existing.score {
        return candidate.score > existing.score;
    }
    let c_priority = candidate.raw().indexer_priority;
    let e_priority = existing.raw().indexer_priority;
    if c_priority != e_priority {
        return c_priority < e_priority;
    }
    candidate.raw().seeders.unwrap_or(0) > existing.raw().seeders.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestrator_core::model::{DownloadLocator, ParsedRelease, Protocol, ReleaseResult};

    fn view(guid: &str, info_hash: Option<&str>, seeders: u32) -> ReleaseView {
        ReleaseView {
            raw: ReleaseResult {
                guid: guid.to_string(),
                title: "Show S01E01 1080p".to_string(),
                indexer_id: 1,
                indexer_name: "test".to_string(),
                indexer_priority: 25,
                protocol: Protocol::Torrent,
                published_at: None,
                size: Some(1_000_000),
                categories: vec![5030],
                locator: DownloadLocator::MagnetUrl("magnet:?xt=urn:btih:abc".to_string()),
                info_hash: info_hash.map(|s| s.to_string()),
                seeders: Some(seeders),
                leechers: Some(0),
            },
            parsed: ParsedRelease::empty("Show"),
        }
    }

    #[test]
    fn pass1_prefers_higher_seeders_within_same_hash() {
        let views = vec![view("a", Some("hash1"), 5), view("b", Some("hash1"), 50)];
        let result = deduplicate(views);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].raw.guid, "b");
    }

    #[test]
    fn distinct_hashes_both_survive() {
        let views = vec![view("a", Some("hash1"), 5), view("b", Some("hash2"), 50)];
        assert_eq!(deduplicate(views).len(), 2);
    }
}
