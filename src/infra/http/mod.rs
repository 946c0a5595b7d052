//! HTTP plumbing towards the posts API.

mod credentials;
mod fetch;

pub use credentials::Credentials;
pub use fetch::{FetchClient, FetchError, FetchOptions, JsonResponse, with_query};
