//! Rate-limit governor. Generalizes the sliding-window timestamp list in
//! `indexers/src/prowlarr.rs::RateLimiter` into a reusable `TokenBucket`
//! used twice per request — once per indexer, once per host — with the
//! check/record split so the orchestrator owns the sleep and can race it
//! against the per-indexer timeout, instead of the teacher's blocking
//! `wait_if_needed`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::Mutex as AsyncMutex;

struct TokenBucket {
    max_requests: u32,
    window: Duration,
    timestamps: Mutex<Vec<Instant>>,
}

impl TokenBucket {
    fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            timestamps: Mutex::new(Vec::new()),
        }
    }

    /// Non-blocking: reports whether a request may proceed right now, and
    /// if not, how long until the oldest timestamp ages out.
    fn check(&self) -> (bool, u64) {
        let now = Instant::now();
        let mut timestamps = self.timestamps.lock().unwrap();
        timestamps.retain(|&t| now.duration_since(t) < self.window);

        if (timestamps.len() as u32) < self.max_requests {
            (true, 0)
        } else {
            let oldest = timestamps[0];
            let wait = self.window.saturating_sub(now.duration_since(oldest));
            (false, wait.as_millis() as u64)
        }
    }

    fn record(&self) {
        let mut timestamps = self.timestamps.lock().unwrap();
        timestamps.push(Instant::now());
    }
}

pub struct RateLimitDecision {
    pub can_proceed: bool,
    pub reason: Option<String>,
    pub wait_time_ms: u64,
}

/// One bucket per indexer id plus one bucket per host, each behind its
/// own lock so contention on one indexer never blocks another.
pub struct RateLimitGovernor {
    default_rpm: u32,
    window: Duration,
    indexer_buckets: AsyncMutex<HashMap<i32, TokenBucket>>,
    host_buckets: AsyncMutex<HashMap<String, TokenBucket>>,
}

fn host_of(base_url: &str) -> String {
    base_url
        .split("://")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or(base_url)
        .to_string()
}

impl RateLimitGovernor {
    pub fn new(default_rpm: u32) -> Self {
        Self {
            default_rpm,
            window: Duration::from_secs(60),
            indexer_buckets: AsyncMutex::new(HashMap::new()),
            host_buckets: AsyncMutex::new(HashMap::new()),
        }
    }

    pub async fn check_rate_limits(
        &self,
        indexer_id: i32,
        base_url: &str,
        indexer_rpm: u32,
    ) -> RateLimitDecision {
        let host = host_of(base_url);

        let mut indexer_buckets = self.indexer_buckets.lock().await;
        let bucket = indexer_buckets
            .entry(indexer_id)
            .or_insert_with(|| TokenBucket::new(indexer_rpm.max(1), self.window));
        let (indexer_ok, indexer_wait) = bucket.check();
        drop(indexer_buckets);

        let mut host_buckets = self.host_buckets.lock().await;
        let bucket = host_buckets
            .entry(host.clone())
            .or_insert_with(|| TokenBucket::new(self.default_rpm.max(1), self.window));
        let (host_ok, host_wait) = bucket.check();
        drop(host_buckets);

        if indexer_ok && host_ok {
            RateLimitDecision {
                can_proceed: true,
                reason: None,
                wait_time_ms: 0,
            }
        } else {
            let reason = if !indexer_ok && !host_ok {
                "indexer and host rate limits"
            } else if !indexer_ok {
                "indexer rate limit"
            } else {
                "host rate limit"
            };
            RateLimitDecision {
                can_proceed: false,
                reason: Some(reason.to_string()),
                wait_time_ms: indexer_wait.max(host_wait),
            }
        }
    }

    pub async fn record_request(&self, indexer_id: i32, base_url: &str) {
        let host = host_of(base_url);
        {
            let indexer_buckets = self.indexer_buckets.lock().await;
            if let Some(bucket) = indexer_buckets.get(&indexer_id) {
                bucket.record();
            }
        }
        {
            let host_buckets = self.host_buckets.lock().await;
            if let Some(bucket) = host_buckets.get(&host) {
                bucket.record();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_requests_under_the_cap() {
        let gov = RateLimitGovernor::new(60);
        for _ in 0..3 {
            let decision = gov.check_rate_limits(1, "https://indexer.example", 5).await;
            assert!(decision.can_proceed);
            gov.record_request(1, "https://indexer.example").await;
        }
    }

    #[tokio::test]
    async fn blocks_once_indexer_bucket_is_exhausted() {
        let gov = RateLimitGovernor::new(60);
        for _ in 0..2 {
            gov.check_rate_limits(1, "https://indexer.example", 2).await;
            gov.record_request(1, "https://indexer.example").await;
        }
        let decision = gov.check_rate_limits(1, "https://indexer.example", 2).await;
        assert!(!decision.can_proceed);
        assert!(decision.wait_time_ms > 0);
    }

    #[tokio::test]
    async fn host_bucket_is_shared_across_indexers_on_same_host() {
        let gov = RateLimitGovernor::new(1);
        gov.check_rate_limits(1, "https://shared.example", 60).await;
        gov.record_request(1, "https://shared.example").await;
        let decision = gov.check_rate_limits(2, "https://shared.example", 60).await;
        assert!(!decision.can_proceed);
    }
}
