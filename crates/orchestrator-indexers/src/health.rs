//! Health & backoff tracker. Redesigned from `service_health.rs`'s
//! generic open/half-open/closed circuit breaker into the spec's exact
//! consecutive-failure-count + exponential-backoff-window semantics,
//! because callers need a concrete `backoff_until` timestamp rather than
//! just a boolean gate.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use orchestrator_core::model::IndexerStatus;
use std::collections::HashMap;
use std::sync::RwLock;

const FAILURE_THRESHOLD: u32 = 3;
const MAX_BACKOFF_MINUTES: i64 = 60 * 24;

fn exponential_backoff_minutes(consecutive_failures: u32) -> i64 {
    let minutes = 2i64.saturating_pow(consecutive_failures.saturating_sub(FAILURE_THRESHOLD) + 1);
    minutes.min(MAX_BACKOFF_MINUTES)
}

pub struct HealthTracker {
    statuses: RwLock<HashMap<i32, IndexerStatus>>,
}

impl HealthTracker {
    pub fn new() -> Self {
        Self {
            statuses: RwLock::new(HashMap::new()),
        }
    }

    pub fn register(&self, indexer_id: i32, priority: i32) {
        let mut statuses = self.statuses.write().unwrap();
        statuses
            .entry(indexer_id)
            .or_insert_with(|| IndexerStatus::new(indexer_id, priority));
    }

    pub fn get_status(&self, indexer_id: i32) -> Option<IndexerStatus> {
        self.statuses.read().unwrap().get(&indexer_id).cloned()
    }

    pub fn can_use(&self, indexer_id: i32, now: DateTime<Utc>) -> bool {
        self.statuses
            .read()
            .unwrap()
            .get(&indexer_id)
            .map(|s| s.can_use(now))
            .unwrap_or(true)
    }

    pub fn record_success(&self, indexer_id: i32) {
        let mut statuses = self.statuses.write().unwrap();
        if let Some(status) = statuses.get_mut(&indexer_id) {
            status.consecutive_failures = 0;
            status.last_success_at = Some(Utc::now());
            status.backoff_until = None;
        }
    }

    pub fn record_failure(&self, indexer_id: i32) {
        let mut statuses = self.statuses.write().unwrap();
        if let Some(status) = statuses.get_mut(&indexer_id) {
            status.consecutive_failures += 1;
            status.last_failure_at = Some(Utc::now());
            if status.consecutive_failures >= FAILURE_THRESHOLD {
                let minutes = exponential_backoff_minutes(status.consecutive_failures);
                status.backoff_until = Some(Utc::now() + ChronoDuration::minutes(minutes));
            }
        }
    }

    pub fn set_enabled(&self, indexer_id: i32, enabled: bool) {
        let mut statuses = self.statuses.write().unwrap();
        if let Some(status) = statuses.get_mut(&indexer_id) {
            status.is_enabled = enabled;
        }
    }
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn becomes_unusable_after_threshold_consecutive_failures() {
        let tracker = HealthTracker::new();
        tracker.register(1, 25);
        assert!(tracker.can_use(1, Utc::now()));

        tracker.record_failure(1);
        tracker.record_failure(1);
        assert!(tracker.can_use(1, Utc::now()), "below threshold still usable");

        tracker.record_failure(1);
        assert!(!tracker.can_use(1, Utc::now()), "at threshold enters backoff");
    }

    #[test]
    fn success_clears_backoff() {
        let tracker = HealthTracker::new();
        tracker.register(1, 25);
        for _ in 0..FAILURE_THRESHOLD {
            tracker.record_failure(1);
        }
        assert!(!tracker.can_use(1, Utc::now()));
        tracker.record_success(1);
        assert!(tracker.can_use(1, Utc::now()));
        assert_eq!(tracker.get_status(1).unwrap().consecutive_failures, 0);
    }

    #[test]
    fn disabled_indexer_is_unusable_regardless_of_backoff() {
        let tracker = HealthTracker::new();
        tracker.register(1, 25);
        tracker.set_enabled(1, false);
        assert!(!tracker.can_use(1, Utc::now()));
    }
}
