//! Shared request and response types for the blogfront posts API.
//!
//! These types describe the JSON exchanged with the remote posts backend and the
//! `{data, error}` envelope handed to the rendering layer.

mod envelope;
mod posts;

pub use envelope::{ApiError, Envelope};
pub use posts::{BlogPost, Pagination, Post, PostListing, PostQuery, parse_tag_list};
