//! Tag-addressed response cache.
//!
//! Post reads are stored under cache tags (`"blogPost"`); a successful write
//! invalidates the tag so later reads go back to the API.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//! max_entries = 256
//! ```

mod config;
mod keys;
mod lock;
mod registry;
mod store;

pub use config::CacheConfig;
pub use keys::{CacheKey, CacheMode, CacheTag};
pub use registry::TagRegistry;
pub use store::{CachedEntry, MemoryTagCache, TagCache};
