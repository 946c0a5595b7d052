//! Cache configuration.
//!
//! Controls the in-process tag cache via the `[cache]` table of `blogfront.toml`.

use std::num::NonZeroUsize;

const DEFAULT_MAX_ENTRIES: usize = 256;

/// Tag cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Serve and store responses. When off the cache is a pass-through.
    pub enabled: bool,
    /// Maximum cached responses before LRU eviction.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            max_entries: settings.max_entries,
        }
    }
}

impl CacheConfig {
    /// Returns the entry limit as NonZeroUsize, clamping to 1 if zero.
    pub fn max_entries_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.max_entries).unwrap_or(NonZeroUsize::MIN)
    }
}
