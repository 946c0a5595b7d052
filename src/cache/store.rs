//! Tag cache contract and the bundled in-memory store.

use std::collections::HashSet;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use metrics::counter;
use serde_json::Value;
use tracing::debug;

use super::config::CacheConfig;
use super::keys::{CacheKey, CacheTag};
use super::lock::rw_write;
use super::registry::TagRegistry;

const SOURCE: &str = "cache::store";

const METRIC_CACHE_HIT: &str = "blogfront_cache_hit_total";
const METRIC_CACHE_MISS: &str = "blogfront_cache_miss_total";
const METRIC_CACHE_STORE: &str = "blogfront_cache_store_total";
const METRIC_CACHE_INVALIDATE: &str = "blogfront_cache_invalidated_total";

/// A cached JSON response with the tags and staleness hint it was stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedEntry {
    pub body: Value,
    pub tags: HashSet<CacheTag>,
    pub stored_at: Instant,
    pub revalidate: Option<Duration>,
}

impl CachedEntry {
    pub fn new(body: Value, tags: &[CacheTag], revalidate: Option<Duration>) -> Self {
        Self {
            body,
            tags: tags.iter().cloned().collect(),
            stored_at: Instant::now(),
            revalidate,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Instant::now())
    }

    /// Without a revalidate window an entry stays fresh until invalidated.
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        match self.revalidate {
            Some(window) => now.saturating_duration_since(self.stored_at) < window,
            None => true,
        }
    }
}

/// External caching subsystem, addressed by string tags.
///
/// Reads are stored with their tags; invalidating a tag drops every response
/// stored under it.
#[async_trait]
pub trait TagCache: Send + Sync {
    async fn lookup(&self, key: &CacheKey) -> Option<CachedEntry>;

    async fn store(&self, key: CacheKey, entry: CachedEntry);

    /// Mark every response under `tag` stale. Returns how many were dropped.
    async fn invalidate_tag(&self, tag: &CacheTag) -> usize;
}

/// LRU-bounded in-process [`TagCache`].
pub struct MemoryTagCache {
    enabled: bool,
    entries: RwLock<LruCache<CacheKey, CachedEntry>>,
    registry: TagRegistry,
}

impl MemoryTagCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            entries: RwLock::new(LruCache::new(config.max_entries_non_zero())),
            registry: TagRegistry::new(),
        }
    }

    pub fn len(&self) -> usize {
        rw_write(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }
}

impl Default for MemoryTagCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

#[async_trait]
impl TagCache for MemoryTagCache {
    async fn lookup(&self, key: &CacheKey) -> Option<CachedEntry> {
        if !self.enabled {
            return None;
        }

        let found = rw_write(&self.entries, SOURCE, "lookup").get(key).cloned();
        if found.is_some() {
            counter!(METRIC_CACHE_HIT).increment(1);
            debug!(cache_key = %key, "Tag cache hit");
        } else {
            counter!(METRIC_CACHE_MISS).increment(1);
            debug!(cache_key = %key, "Tag cache miss");
        }
        found
    }

    async fn store(&self, key: CacheKey, entry: CachedEntry) {
        if !self.enabled {
            return;
        }

        let tags = entry.tags.clone();
        let mut entries = rw_write(&self.entries, SOURCE, "store");
        if let Some((evicted, _)) = entries.push(key.clone(), entry) {
            if evicted != key {
                debug!(cache_key = %evicted, "Tag cache evicted entry");
                self.registry.unregister(&evicted);
            }
        }
        self.registry.register(key.clone(), tags);
        counter!(METRIC_CACHE_STORE).increment(1);
        debug!(cache_key = %key, "Tag cache stored entry");
    }

    async fn invalidate_tag(&self, tag: &CacheTag) -> usize {
        if !self.enabled {
            return 0;
        }

        let mut entries = rw_write(&self.entries, SOURCE, "invalidate_tag");
        let dropped = self
            .registry
            .unregister_tag(tag)
            .iter()
            .filter(|key| entries.pop(*key).is_some())
            .count();
        counter!(METRIC_CACHE_INVALIDATE).increment(dropped as u64);
        dropped
    }
}
