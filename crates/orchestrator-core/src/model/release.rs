//! Raw and enriched release shapes. `ReleaseView` replaces the teacher's
//! pattern of a lazily-computed private field on the release itself
//! (e.g. `multi_indexer.rs` mutating results in place) with an explicit
//! value constructed once at the enrichment boundary.

use super::capabilities::CategoryId;
use super::parsed::ParsedRelease;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    Torrent,
    Usenet,
    Streaming,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DownloadLocator {
    DownloadUrl(String),
    MagnetUrl(String),
    StreamUrl(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseResult {
    pub guid: String,
    pub title: String,
    pub indexer_id: i32,
    pub indexer_name: String,
    pub indexer_priority: i32,
    pub protocol: Protocol,
    pub published_at: Option<DateTime<Utc>>,
    pub size: Option<u64>,
    pub categories: Vec<CategoryId>,
    pub locator: DownloadLocator,
    pub info_hash: Option<String>,
    pub seeders: Option<u32>,
    pub leechers: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionCode {
    MinSeeders,
    DeadTorrent,
    SizeOutOfBounds,
    CategoryMismatch,
    NotRelevantTitle,
    TvNoiseInMovieSearch,
    SeasonEpisodePolicy,
    BelowMinScore,
}

/// A release paired with its (pure) parse — constructed once, never
/// mutated again.
#[derive(Debug, Clone)]
pub struct ReleaseView {
    pub raw: ReleaseResult,
    pub parsed: ParsedRelease,
}

#[derive(Debug, Clone)]
pub struct EnhancedReleaseResult {
    pub view: ReleaseView,
    pub score: i32,
    pub rejected: bool,
    pub rejection_reasons: Vec<RejectionCode>,
    pub release_weight: Option<usize>,
}

impl EnhancedReleaseResult {
    pub fn raw(&self) -> &ReleaseResult {
        &self.view.raw
    }

    pub fn parsed(&self) -> &ParsedRelease {
        &self.view.parsed
    }
}
