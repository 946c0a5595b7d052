pub mod actions;
pub mod error;
pub mod posts;

use std::sync::Arc;

use crate::cache::{CacheConfig, MemoryTagCache, TagCache};
use crate::config::Settings;
use crate::infra::http::FetchClient;

pub use actions::PostActions;
pub use error::AppError;
pub use posts::PostService;

/// Wire the cache, HTTP client, service and action layer from resolved settings.
pub fn build_actions(settings: &Settings) -> Result<PostActions, AppError> {
    let cache: Arc<dyn TagCache> =
        Arc::new(MemoryTagCache::new(&CacheConfig::from(&settings.cache)));
    let fetch = FetchClient::new(
        settings.api.base_url.clone(),
        settings.http.timeout,
        cache.clone(),
    )?;
    Ok(PostActions::new(PostService::new(fetch), cache))
}
