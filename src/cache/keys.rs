//! Cache key, tag, and mode definitions.

use std::borrow::Cow;
use std::fmt;

/// Opaque label grouping cached reads for bulk invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheTag(Cow<'static, str>);

impl CacheTag {
    /// Tag attached to every post read.
    pub const BLOG_POST: CacheTag = CacheTag(Cow::Borrowed("blogPost"));

    pub fn new(label: impl Into<String>) -> Self {
        Self(Cow::Owned(label.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one cached response: request method plus the full URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(method: &str, url: &str) -> Self {
        Self(format!("{method} {url}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-request cache directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CacheMode {
    /// Serve a fresh cached response, otherwise fetch and store.
    #[default]
    Default,
    /// Never read or write the cache.
    NoStore,
    /// Skip the lookup, fetch, then store.
    Reload,
    /// Always fetch, then store.
    NoCache,
    /// Serve any cached response even if stale.
    ForceCache,
    /// Serve any cached response; never touch the network.
    OnlyIfCached,
}

impl CacheMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::NoStore => "no-store",
            Self::Reload => "reload",
            Self::NoCache => "no-cache",
            Self::ForceCache => "force-cache",
            Self::OnlyIfCached => "only-if-cached",
        }
    }

    pub fn reads_cache(self) -> bool {
        matches!(
            self,
            Self::Default | Self::ForceCache | Self::OnlyIfCached
        )
    }

    pub fn writes_cache(self) -> bool {
        matches!(self, Self::Default | Self::Reload | Self::NoCache | Self::ForceCache)
    }

    pub fn accepts_stale(self) -> bool {
        matches!(self, Self::ForceCache | Self::OnlyIfCached)
    }

    pub fn network_allowed(self) -> bool {
        !matches!(self, Self::OnlyIfCached)
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_post_tag_label() {
        assert_eq!(CacheTag::BLOG_POST.as_str(), "blogPost");
        assert_eq!(CacheTag::BLOG_POST, CacheTag::new("blogPost"));
    }

    #[test]
    fn cache_key_includes_method_and_query() {
        let a = CacheKey::new("GET", "http://api.test/posts?page=1");
        let b = CacheKey::new("GET", "http://api.test/posts?page=2");
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "GET http://api.test/posts?page=1");
    }

    #[test]
    fn cache_mode_displays_fetch_directive_names() {
        assert_eq!(CacheMode::default().to_string(), "default");
        assert_eq!(CacheMode::OnlyIfCached.to_string(), "only-if-cached");
        assert_eq!(CacheMode::NoStore.to_string(), "no-store");
    }

    #[test]
    fn no_store_bypasses_cache() {
        assert!(!CacheMode::NoStore.reads_cache());
        assert!(!CacheMode::NoStore.writes_cache());
        assert!(CacheMode::NoStore.network_allowed());
    }

    #[test]
    fn only_if_cached_stays_offline() {
        assert!(CacheMode::OnlyIfCached.reads_cache());
        assert!(CacheMode::OnlyIfCached.accepts_stale());
        assert!(!CacheMode::OnlyIfCached.network_allowed());
        assert!(!CacheMode::OnlyIfCached.writes_cache());
    }
}
