//! Generic short-lived cache with an injectable clock, replacing the
//! several heterogeneous caches a naive port would otherwise grow.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Abstracts "now" so cache expiry is deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// A TTL-bounded map. Reads past the TTL behave as a miss without being
/// evicted eagerly; `set` always replaces.
pub struct Cache<K, V, C: Clock = SystemClock> {
    ttl: Duration,
    clock: C,
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<K, V, C: Clock> Cache<K, V, C>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().unwrap();
        let entry = entries.get(key)?;
        if self.clock.now().duration_since(entry.inserted_at) > self.ttl {
            return None;
        }
        Some(entry.value.clone())
    }

    pub fn set(&self, key: K, value: V) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            key,
            Entry {
                value,
                inserted_at: self.clock.now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct FakeClock {
        now: Arc<Mutex<Instant>>,
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    #[test]
    fn hit_then_miss_after_ttl() {
        let base = Instant::now();
        let now = Arc::new(Mutex::new(base));
        let cache: Cache<String, u32, FakeClock> = Cache::with_clock(
            Duration::from_secs(10),
            FakeClock { now: now.clone() },
        );
        cache.set("fp1".to_string(), 7);
        assert_eq!(cache.get(&"fp1".to_string()), Some(7));

        *now.lock().unwrap() = base + Duration::from_secs(11);
        assert_eq!(cache.get(&"fp1".to_string()), None);
    }

    #[test]
    fn set_replaces_prior_value() {
        let cache: Cache<String, u32> = Cache::new(Duration::from_secs(60));
        cache.set("fp1".to_string(), 1);
        cache.set("fp1".to_string(), 2);
        assert_eq!(cache.get(&"fp1".to_string()), Some(2));
    }
}
