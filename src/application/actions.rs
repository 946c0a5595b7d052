//! Server-side action boundary over [`PostService`].
//!
//! Reads delegate unchanged. A create that succeeds drops every cached read
//! tagged `blogPost`; a failed create leaves the cache alone.

use std::sync::Arc;

use blogfront_api_types::{BlogPost, Envelope, Post, PostListing, PostQuery};
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{CacheTag, TagCache};
use crate::infra::http::{Credentials, FetchOptions};

use super::posts::PostService;

#[derive(Clone)]
pub struct PostActions {
    posts: PostService,
    cache: Arc<dyn TagCache>,
}

impl PostActions {
    pub fn new(posts: PostService, cache: Arc<dyn TagCache>) -> Self {
        Self { posts, cache }
    }

    pub fn posts(&self) -> &PostService {
        &self.posts
    }

    pub async fn get_posts(
        &self,
        query: Option<&PostQuery>,
        options: Option<&FetchOptions>,
    ) -> Envelope<PostListing> {
        self.posts.list_posts(query, options).await
    }

    pub async fn get_post(&self, id: &str) -> Envelope<Post> {
        self.posts.get_post(id).await
    }

    pub async fn create_post(
        &self,
        payload: &BlogPost,
        credentials: &Credentials,
    ) -> Envelope<Value> {
        let res = self.posts.create_post(payload, credentials).await;
        if res.is_data() {
            let dropped = self.cache.invalidate_tag(&CacheTag::BLOG_POST).await;
            info!(
                tag = %CacheTag::BLOG_POST,
                dropped,
                "Invalidated cached post reads after create"
            );
        } else {
            debug!("Create failed; cache left untouched");
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::Url;

    use crate::cache::{CacheKey, CachedEntry};
    use crate::infra::http::FetchClient;

    use super::*;

    #[derive(Default)]
    struct RecordingCache {
        invalidated: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TagCache for RecordingCache {
        async fn lookup(&self, _key: &CacheKey) -> Option<CachedEntry> {
            None
        }

        async fn store(&self, _key: CacheKey, _entry: CachedEntry) {}

        async fn invalidate_tag(&self, tag: &CacheTag) -> usize {
            self.invalidated
                .lock()
                .expect("recording lock")
                .push(tag.as_str().to_string());
            0
        }
    }

    fn actions_against(base: &str, cache: Arc<RecordingCache>) -> PostActions {
        let base = Url::parse(base).expect("base url");
        let fetch = FetchClient::new(base, None, cache.clone()).expect("client");
        PostActions::new(PostService::new(fetch), cache)
    }

    #[tokio::test]
    async fn unreachable_backend_does_not_invalidate() {
        let cache = Arc::new(RecordingCache::default());
        let actions = actions_against("http://127.0.0.1:1/", cache.clone());

        let res = actions
            .create_post(
                &BlogPost::new("t", "c", Vec::new()),
                &Credentials::anonymous(),
            )
            .await;

        assert!(res.is_error());
        assert!(cache.invalidated.lock().expect("lock").is_empty());
    }
}
