//! Outbound JSON client for the posts API.
//!
//! One call, one request: no retries and no backoff. Reads consult the tag
//! cache according to their [`CacheMode`]; writes never touch it.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{COOKIE, InvalidHeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::cache::{CacheKey, CacheMode, CacheTag, CachedEntry, TagCache};

use super::credentials::Credentials;

const BODY_SNIPPET_CHARS: usize = 512;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("base URL `{0}` cannot carry path segments")]
    Endpoint(String),
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid cookie header: {0}")]
    Header(#[from] InvalidHeaderValue),
    #[error("server error: status {status} body {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to parse body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Shape(#[source] serde_json::Error),
    #[error("no cached response for `{0}` and the network is not allowed")]
    CacheMiss(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Endpoint(_) => "endpoint",
            Self::Transport(_) => "transport",
            Self::Header(_) => "header",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
            Self::Shape(_) => "shape",
            Self::CacheMiss(_) => "cache_miss",
        }
    }
}

/// Caller-supplied caching hints for a read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub cache: Option<CacheMode>,
    /// Seconds after which a cached read is stale. Zero is ignored.
    pub revalidate: Option<u64>,
}

impl FetchOptions {
    pub fn with_cache(mode: CacheMode) -> Self {
        Self {
            cache: Some(mode),
            revalidate: None,
        }
    }

    pub fn with_revalidate(seconds: u64) -> Self {
        Self {
            cache: None,
            revalidate: Some(seconds),
        }
    }

    pub fn mode(&self) -> CacheMode {
        self.cache.unwrap_or_default()
    }

    pub fn revalidate_window(&self) -> Option<Duration> {
        self.revalidate
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }
}

/// Status and parsed JSON body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Clone)]
pub struct FetchClient {
    client: Client,
    base: Url,
    cache: Arc<dyn TagCache>,
}

impl FetchClient {
    pub fn new(
        base: Url,
        timeout: Option<Duration>,
        cache: Arc<dyn TagCache>,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base,
            cache,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("blogfront/", env!("CARGO_PKG_VERSION"))
    }

    /// Append percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| FetchError::Endpoint(self.base.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// GET `url` and decode the JSON body into `T`, going through the tag cache.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        options: &FetchOptions,
        tags: &[CacheTag],
    ) -> Result<T, FetchError> {
        let mode = options.mode();
        let key = CacheKey::new("GET", url.as_str());
        debug!(url = %url, cache_mode = %mode, tags = ?tags, "Fetching JSON");

        if mode.reads_cache() {
            if let Some(entry) = self.cache.lookup(&key).await {
                if mode.accepts_stale() || entry.is_fresh() {
                    return T::deserialize(&entry.body).map_err(FetchError::Shape);
                }
                debug!(cache_key = %key, "Cached response is stale");
            }
        }

        if !mode.network_allowed() {
            return Err(FetchError::CacheMiss(url.to_string()));
        }

        let response = self.execute(self.client.get(url)).await?;
        if !response.status.is_success() {
            return Err(FetchError::Status {
                status: response.status,
                body: snippet(&response.body.to_string()),
            });
        }

        let typed = T::deserialize(&response.body).map_err(FetchError::Shape)?;
        if mode.writes_cache() {
            let entry = CachedEntry::new(response.body, tags, options.revalidate_window());
            self.cache.store(key, entry).await;
        }
        Ok(typed)
    }

    /// POST `body` as JSON, forwarding `credentials` as the `Cookie` header.
    ///
    /// The status is returned rather than checked; callers decide what a
    /// rejection means for them.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
        credentials: &Credentials,
    ) -> Result<JsonResponse, FetchError> {
        debug!(url = %url, credentials = ?credentials, "Posting JSON");
        let mut request = self.client.post(url).json(body);
        if let Some(cookie) = credentials.header_value()? {
            request = request.header(COOKIE, cookie);
        }
        self.execute(request).await
    }

    async fn execute(&self, request: RequestBuilder) -> Result<JsonResponse, FetchError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice(&bytes) {
            Ok(body) => Ok(JsonResponse { status, body }),
            Err(_) if !status.is_success() => Err(FetchError::Status {
                status,
                body: snippet(&String::from_utf8_lossy(&bytes)),
            }),
            Err(err) => Err(FetchError::Decode(err)),
        }
    }
}

/// Append query pairs to `url`. An empty list leaves the URL without `?`.
pub fn with_query(mut url: Url, pairs: &[(&str, String)]) -> Url {
    if !pairs.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            query.append_pair(key, value);
        }
    }
    url
}

fn snippet(text: &str) -> String {
    text.chars().take(BODY_SNIPPET_CHARS).collect()
}
