use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;

struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

/// Request-keyed response cache. The most recently stored response for a
/// key wins; entries older than the TTL are treated as absent. A zero TTL
/// disables caching.
pub struct QueryCache<T> {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> QueryCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        if !self.is_enabled() {
            return None;
        }
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub async fn put(&self, key: &str, value: T) {
        if !self.is_enabled() {
            return;
        }
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub async fn invalidate(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}
