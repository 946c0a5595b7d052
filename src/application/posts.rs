//! Post reads and writes against the posts API.
//!
//! Every operation returns an [`Envelope`]; failures are logged and folded into
//! the error side, never propagated.

use blogfront_api_types::{BlogPost, Envelope, Post, PostListing, PostQuery};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::CacheTag;
use crate::infra::http::{Credentials, FetchClient, FetchError, FetchOptions, with_query};

const POSTS_PATH: &str = "posts";

/// Message for a create the backend refused.
pub const POST_NOT_CREATED: &str = "Error: Post not created.";
/// Message for a create that never got a usable answer.
pub const SOMETHING_WENT_WRONG: &str = "Something Went Wrong";
/// Message for any failed single-post lookup.
pub const NOT_FOUND_DATA: &str = "Not found data";

const READ_TAGS: &[CacheTag] = &[CacheTag::BLOG_POST];

#[derive(Clone)]
pub struct PostService {
    fetch: FetchClient,
}

impl PostService {
    pub fn new(fetch: FetchClient) -> Self {
        Self { fetch }
    }

    /// Listing URL carrying only the filters that are present and non-empty.
    pub fn list_url(&self, query: Option<&PostQuery>) -> Result<Url, FetchError> {
        let url = self.fetch.endpoint(&[POSTS_PATH])?;
        let pairs = query.map(PostQuery::query_pairs).unwrap_or_default();
        Ok(with_query(url, &pairs))
    }

    /// List posts. The read is always tagged `blogPost`, whatever the options.
    pub async fn list_posts(
        &self,
        query: Option<&PostQuery>,
        options: Option<&FetchOptions>,
    ) -> Envelope<PostListing> {
        let options = options.copied().unwrap_or_default();
        let result = match self.list_url(query) {
            Ok(url) => self.fetch.get_json(url, &options, READ_TAGS).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(listing) => Envelope::Data(listing),
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "Post listing failed");
                Envelope::error(err.to_string())
            }
        }
    }

    /// Fetch a single post by id.
    pub async fn get_post(&self, id: &str) -> Envelope<Post> {
        let result = match self.fetch.endpoint(&[POSTS_PATH, id]) {
            Ok(url) => {
                self.fetch
                    .get_json(url, &FetchOptions::default(), READ_TAGS)
                    .await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(post) => Envelope::Data(post),
            Err(err) => {
                warn!(post_id = id, error = %err, kind = err.kind(), "Post lookup failed");
                Envelope::error(NOT_FOUND_DATA)
            }
        }
    }

    /// Create a post, forwarding the caller's session cookies.
    ///
    /// A body with a truthy `error` field, or a non-success status, is a rejection and
    /// yields [`POST_NOT_CREATED`]; the backend detail only reaches the logs.
    pub async fn create_post(
        &self,
        payload: &BlogPost,
        credentials: &Credentials,
    ) -> Envelope<Value> {
        let result = match self.fetch.endpoint(&[POSTS_PATH]) {
            Ok(url) => self.fetch.post_json(url, payload, credentials).await,
            Err(err) => Err(err),
        };

        let response = match result {
            Ok(response) => response,
            Err(err @ FetchError::Status { .. }) => {
                warn!(error = %err, "Post creation rejected by backend");
                return Envelope::error(POST_NOT_CREATED);
            }
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "Post creation failed");
                return Envelope::error(SOMETHING_WENT_WRONG);
            }
        };

        let backend_error = response.body.get("error").filter(|value| is_truthy(value));
        if backend_error.is_some() || !response.status.is_success() {
            warn!(
                status = %response.status,
                backend_error = ?backend_error,
                "Post creation rejected by backend"
            );
            return Envelope::error(POST_NOT_CREATED);
        }

        debug!(status = %response.status, "Post created");
        Envelope::Data(response.body)
    }
}

/// `null`, `false`, `0` and `""` mean the backend reported no error.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
