use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const FALLBACK_PAGE_LIMIT: u64 = 10;

/// Payload submitted when creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl BlogPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags,
        }
    }

    /// Build a payload from raw form fields, where `tags` is a comma separated list.
    pub fn from_form(title: &str, content: &str, tags: &str) -> Self {
        Self::new(title, content, parse_tag_list(tags))
    }
}

/// Split a comma separated tag list, trimming entries and dropping blanks.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Optional filters for the post listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl PostQuery {
    /// Query pairs to send, skipping absent and empty values.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(featured) = self.is_featured {
            pairs.push(("isFeatured", featured.to_string()));
        }
        let text_fields = [
            ("search", &self.search),
            ("page", &self.page),
            ("limit", &self.limit),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }
        pairs
    }
}

/// A post as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Backend fields this client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub limit: u64,
    pub page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: FALLBACK_PAGE_LIMIT,
            page: 1,
            total: 0,
            total_pages: 1,
        }
    }
}

/// Response body of the post listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostListing {
    #[serde(default)]
    pub data: Vec<Post>,
    #[serde(default)]
    pub pagination: Pagination,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
