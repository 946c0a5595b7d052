//! Blog post data access with tag-based cache invalidation.
//!
//! [`application::PostService`] talks to the posts API and always answers with an
//! [`Envelope`](types::Envelope). [`application::PostActions`] sits in front of it
//! and invalidates the `"blogPost"` cache tag after a successful create.

pub mod application;
pub mod cache;
pub mod config;
pub mod infra;

pub use blogfront_api_types as types;
