//! Bidirectional tag registry.
//!
//! Tracks which cached responses carry which tags so that invalidating a tag
//! reaches every response produced under it, whatever query produced it.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use super::keys::{CacheKey, CacheTag};
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::registry";

/// Tracks tag → cache_keys and cache_key → tags mappings.
///
/// Locks are always taken in the order `tag_to_keys`, then `key_to_tags`.
pub struct TagRegistry {
    tag_to_keys: RwLock<HashMap<CacheTag, HashSet<CacheKey>>>,
    key_to_tags: RwLock<HashMap<CacheKey, HashSet<CacheTag>>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self {
            tag_to_keys: RwLock::new(HashMap::new()),
            key_to_tags: RwLock::new(HashMap::new()),
        }
    }

    /// Register a cache entry under its tags, replacing any previous tag set.
    pub fn register(&self, cache_key: CacheKey, tags: HashSet<CacheTag>) {
        let mut t2k = rw_write(&self.tag_to_keys, SOURCE, "register.t2k");
        let mut k2t = rw_write(&self.key_to_tags, SOURCE, "register.k2t");

        if let Some(previous) = k2t.remove(&cache_key) {
            detach(&mut t2k, &cache_key, previous);
        }
        for tag in &tags {
            t2k.entry(tag.clone()).or_default().insert(cache_key.clone());
        }
        k2t.insert(cache_key, tags);
    }

    pub fn keys_for_tag(&self, tag: &CacheTag) -> HashSet<CacheKey> {
        rw_read(&self.tag_to_keys, SOURCE, "keys_for_tag")
            .get(tag)
            .cloned()
            .unwrap_or_default()
    }

    pub fn tags_for_key(&self, cache_key: &CacheKey) -> HashSet<CacheTag> {
        rw_read(&self.key_to_tags, SOURCE, "tags_for_key")
            .get(cache_key)
            .cloned()
            .unwrap_or_default()
    }

    /// Forget a cache key, e.g. after eviction.
    pub fn unregister(&self, cache_key: &CacheKey) {
        let mut t2k = rw_write(&self.tag_to_keys, SOURCE, "unregister.t2k");
        let mut k2t = rw_write(&self.key_to_tags, SOURCE, "unregister.k2t");

        if let Some(tags) = k2t.remove(cache_key) {
            detach(&mut t2k, cache_key, tags);
        }
    }

    /// Remove a tag and every key registered under it.
    ///
    /// The keys lose all of their mappings, since their entries are about to be
    /// dropped from the store. Returns the affected keys.
    pub fn unregister_tag(&self, tag: &CacheTag) -> HashSet<CacheKey> {
        let mut t2k = rw_write(&self.tag_to_keys, SOURCE, "unregister_tag.t2k");
        let mut k2t = rw_write(&self.key_to_tags, SOURCE, "unregister_tag.k2t");

        let affected = t2k.remove(tag).unwrap_or_default();
        for cache_key in &affected {
            if let Some(tags) = k2t.remove(cache_key) {
                detach(&mut t2k, cache_key, tags);
            }
        }
        affected
    }

    pub fn tag_count(&self) -> usize {
        rw_read(&self.tag_to_keys, SOURCE, "tag_count").len()
    }

    pub fn key_count(&self) -> usize {
        rw_read(&self.key_to_tags, SOURCE, "key_count").len()
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn detach(
    t2k: &mut HashMap<CacheTag, HashSet<CacheKey>>,
    cache_key: &CacheKey,
    tags: HashSet<CacheTag>,
) {
    for tag in tags {
        if let Some(keys) = t2k.get_mut(&tag) {
            keys.remove(cache_key);
            if keys.is_empty() {
                t2k.remove(&tag);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(query: &str) -> CacheKey {
        CacheKey::new("GET", &format!("http://api.test/posts{query}"))
    }

    fn tags(labels: &[&str]) -> HashSet<CacheTag> {
        labels.iter().map(|label| CacheTag::new(*label)).collect()
    }

    #[test]
    fn register_and_lookup() {
        let registry = TagRegistry::new();
        registry.register(key(""), tags(&["blogPost"]));

        assert!(registry.keys_for_tag(&CacheTag::BLOG_POST).contains(&key("")));
        assert!(registry.tags_for_key(&key("")).contains(&CacheTag::BLOG_POST));
    }

    #[test]
    fn unregister_cleans_up_mappings() {
        let registry = TagRegistry::new();
        registry.register(key(""), tags(&["blogPost"]));
        assert_eq!(registry.key_count(), 1);
        assert_eq!(registry.tag_count(), 1);

        registry.unregister(&key(""));
        assert_eq!(registry.key_count(), 0);
        assert_eq!(registry.tag_count(), 0);
    }

    #[test]
    fn re_register_replaces_tag_set() {
        let registry = TagRegistry::new();
        registry.register(key(""), tags(&["blogPost", "featured"]));
        registry.register(key(""), tags(&["blogPost"]));

        assert!(registry.keys_for_tag(&CacheTag::new("featured")).is_empty());
        assert_eq!(registry.tag_count(), 1);
    }

    #[test]
    fn unregister_tag_returns_every_query() {
        let registry = TagRegistry::new();
        registry.register(key("?page=1"), tags(&["blogPost"]));
        registry.register(key("?page=2"), tags(&["blogPost", "featured"]));
        registry.register(key("/about"), tags(&["pages"]));

        let affected = registry.unregister_tag(&CacheTag::BLOG_POST);
        assert_eq!(affected.len(), 2);
        assert!(affected.contains(&key("?page=1")));
        assert!(affected.contains(&key("?page=2")));

        // page=2 also leaves the `featured` tag
        assert!(registry.keys_for_tag(&CacheTag::new("featured")).is_empty());
        assert_eq!(registry.key_count(), 1);
    }
}
