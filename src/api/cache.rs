//! In-memory response cache with per-entry expiry.

use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry {
    body: Value,
    expires_at: Instant,
}

/// Response bodies keyed by request, each valid until its TTL elapses.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh body for `key`, if any.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .get(key)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.body.clone())
    }

    pub fn insert(&mut self, key: impl Into<String>, body: Value, ttl: Duration) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                body,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Drop expired entries.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| now < entry.expires_at);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let mut cache = ResponseCache::new();
        cache.insert("function=GLOBAL_QUOTE&symbol=IBM", json!({"p": 1}), Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("function=GLOBAL_QUOTE&symbol=IBM"), Some(json!({"p": 1})));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("function=GLOBAL_QUOTE&symbol=IBM"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let mut cache = ResponseCache::new();
        cache.insert("short", json!(1), Duration::from_secs(1));
        cache.insert("long", json!(2), Duration::from_secs(100));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("long"), Some(json!(2)));
    }

    #[test]
    fn test_missing_key() {
        let cache = ResponseCache::new();
        assert!(cache.get("nothing").is_none());
        assert!(cache.is_empty());
    }
}
