//! Indexer instance identity and its persisted health/priority record,
//! generalized from `core/src/models/indexer.rs`'s `Indexer` struct.

use super::capabilities::IndexerCapabilities;
use super::release::Protocol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerInstance {
    pub id: i32,
    pub name: String,
    pub protocol: Protocol,
    pub base_url: String,
    pub capabilities: IndexerCapabilities,
    pub interactive_enabled: bool,
    pub automatic_enabled: bool,
    pub seed_ratio: Option<f64>,
    pub seed_time_minutes: Option<u32>,
    pub requests_per_minute: u32,
    pub protocol_settings: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerStatus {
    pub indexer_id: i32,
    pub is_enabled: bool,
    pub priority: i32,
    pub consecutive_failures: u32,
    pub last_failure_at: Option<DateTime<Utc>>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub backoff_until: Option<DateTime<Utc>>,
}

impl IndexerStatus {
    pub fn new(indexer_id: i32, priority: i32) -> Self {
        Self {
            indexer_id,
            is_enabled: true,
            priority,
            consecutive_failures: 0,
            last_failure_at: None,
            last_success_at: None,
            backoff_until: None,
        }
    }

    pub fn can_use(&self, now: DateTime<Utc>) -> bool {
        self.is_enabled && self.backoff_until.map(|b| now >= b).unwrap_or(true)
    }
}
