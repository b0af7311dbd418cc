//! TTL reply cache.
//!
//! In-process substitute for a platform edge cache: replies are stored under
//! the full upstream URL for a fixed TTL and served without a network call
//! while fresh. Replies of any status are cached ("cache everything").

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::upstream::client::UpstreamReply;

#[derive(Clone)]
struct CachedReply {
    reply: UpstreamReply,
    stored_at: Instant,
}

impl CachedReply {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// A thread-safe reply cache keyed by the full upstream URL.
#[derive(Clone)]
pub struct ReplyCache {
    inner: Arc<DashMap<String, CachedReply>>,
    ttl: Duration,
}

impl ReplyCache {
    /// Create an empty cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Look up a fresh reply. Evicts the entry if it has expired.
    pub fn get(&self, key: &str) -> Option<UpstreamReply> {
        let cached = self
            .inner
            .get(key)
            .map(|entry| (entry.is_fresh(self.ttl), entry.reply.clone()));

        match cached {
            Some((true, reply)) => Some(reply),
            Some((false, _)) => {
                self.inner.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a reply, replacing any previous entry for the same URL.
    pub fn insert(&self, key: String, reply: UpstreamReply) {
        self.inner.insert(
            key,
            CachedReply {
                reply,
                stored_at: Instant::now(),
            },
        );
    }

    /// Count cached replies, stale entries included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::StatusCode;

    fn reply(status: StatusCode, body: &str) -> UpstreamReply {
        UpstreamReply {
            status,
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    #[test]
    fn test_fresh_entry_is_served() {
        let cache = ReplyCache::new(Duration::from_secs(300));
        assert!(cache.get("http://u/a").is_none());

        cache.insert("http://u/a".into(), reply(StatusCode::OK, r#"{"list":[]}"#));
        let hit = cache.get("http://u/a").unwrap();
        assert_eq!(hit.status, StatusCode::OK);
        assert_eq!(hit.body.as_ref(), br#"{"list":[]}"#);
    }

    #[test]
    fn test_non_success_replies_are_cached_too() {
        let cache = ReplyCache::new(Duration::from_secs(300));
        cache.insert(
            "http://u/a".into(),
            reply(StatusCode::SERVICE_UNAVAILABLE, "down"),
        );
        let hit = cache.get("http://u/a").unwrap();
        assert_eq!(hit.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_stale_entry_is_evicted() {
        let cache = ReplyCache::new(Duration::ZERO);
        cache.insert("http://u/a".into(), reply(StatusCode::OK, "{}"));

        assert!(cache.get("http://u/a").is_none());
        assert!(cache.is_empty(), "stale entry should be removed on lookup");
    }

    #[test]
    fn test_insert_replaces_previous_entry() {
        let cache = ReplyCache::new(Duration::from_secs(300));
        cache.insert("k".into(), reply(StatusCode::OK, "first"));
        cache.insert("k".into(), reply(StatusCode::OK, "second"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k").unwrap().body.as_ref(), b"second");
    }
}
