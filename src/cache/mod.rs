//! Response cache for CMS requests
//!
//! Successful upstream responses are kept in memory, keyed by the full
//! request URL, and reused until their revalidation window runs out. Only
//! responses that decoded cleanly are stored, so a bad upstream answer is
//! retried on the next request instead of being served for the whole window.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// The parts of an upstream response needed to rebuild a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    /// Raw response body
    pub body: String,
    /// `X-WP-Total` header value, if any
    pub total: Option<String>,
    /// `X-WP-TotalPages` header value, if any
    pub total_pages: Option<String>,
}

#[derive(Debug)]
struct CacheEntry {
    response: CachedResponse,
    expires_at: Instant,
}

/// In-memory, time-bounded response store shared across requests
#[derive(Debug)]
pub struct ResponseCache {
    enabled: bool,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    /// Create an empty, enabled cache
    pub fn new() -> Self {
        Self {
            enabled: true,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Create a cache that never stores anything
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Look up a fresh response for `key`
    pub fn get(&self, key: &str) -> Option<CachedResponse> {
        self.get_at(key, Instant::now())
    }

    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<CachedResponse> {
        if !self.enabled {
            return None;
        }

        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.response.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a response for `ttl`. A zero window stores nothing.
    ///
    /// Expired entries are dropped on every insert, so keys that are never
    /// requested again (one-off searches, deep pages) do not pile up.
    pub fn insert(&self, key: String, response: CachedResponse, ttl: Duration) {
        self.insert_at(key, response, ttl, Instant::now());
    }

    pub(crate) fn insert_at(
        &self,
        key: String,
        response: CachedResponse,
        ttl: Duration,
        now: Instant,
    ) {
        if !self.enabled || ttl.is_zero() {
            return;
        }

        let mut entries = self.lock();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key,
            CacheEntry {
                response,
                expires_at: now + ttl,
            },
        );
    }

    /// Drop every expired entry
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub(crate) fn purge_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    /// Drop everything
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, including ones not yet purged
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // A panic while holding the lock cannot leave a half-written entry
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &str) -> CachedResponse {
        CachedResponse {
            body: body.to_string(),
            total: Some("12".to_string()),
            total_pages: Some("2".to_string()),
        }
    }

    #[test]
    fn test_hit_within_window() {
        let cache = ResponseCache::new();
        let now = Instant::now();
        cache.insert_at("k".into(), response("[]"), Duration::from_secs(60), now);

        let hit = cache.get_at("k", now + Duration::from_secs(59)).unwrap();
        assert_eq!(hit, response("[]"));
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let cache = ResponseCache::new();
        let now = Instant::now();
        cache.insert_at("k".into(), response("[]"), Duration::from_secs(60), now);

        assert!(cache.get_at("k", now + Duration::from_secs(60)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_ttl_is_not_stored() {
        let cache = ResponseCache::new();
        cache.insert("k".into(), response("[]"), Duration::ZERO);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_disabled_cache() {
        let cache = ResponseCache::disabled();
        assert!(!cache.is_enabled());
        cache.insert("k".into(), response("[]"), Duration::from_secs(60));
        assert!(cache.get("k").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_insert_drops_stale_keys() {
        let cache = ResponseCache::new();
        let now = Instant::now();
        for i in 0..1000 {
            cache.insert_at(
                format!("/posts?search=q{i}"),
                response("[]"),
                Duration::from_secs(60),
                now,
            );
        }
        assert_eq!(cache.len(), 1000);

        let later = now + Duration::from_secs(3600);
        cache.insert_at("/categories".into(), response("[]"), Duration::from_secs(60), later);
        assert_eq!(cache.len(), 1);
        assert!(cache.get_at("/categories", later).is_some());
    }

    #[test]
    fn test_insert_keeps_fresh_keys() {
        let cache = ResponseCache::new();
        let now = Instant::now();
        cache.insert_at("a".into(), response("[1]"), Duration::from_secs(600), now);

        let later = now + Duration::from_secs(120);
        cache.insert_at("b".into(), response("[2]"), Duration::from_secs(60), later);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_at("a", later), Some(response("[1]")));
    }

    #[test]
    fn test_purge_expired() {
        let cache = ResponseCache::new();
        let now = Instant::now();
        cache.insert_at("old".into(), response("[1]"), Duration::from_secs(60), now);
        cache.insert_at("new".into(), response("[2]"), Duration::from_secs(600), now);

        let later = now + Duration::from_secs(120);
        assert_eq!(cache.purge_expired_at(later), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get_at("new", later).is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
