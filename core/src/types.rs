//! Request payloads and typed views over common responses.
//!
//! # Design
//! Every operation returns the service's JSON untouched as a `Value`. The
//! structs here are opt-in: payload types skip `None` fields so only what the
//! caller set is sent, and response types read the handful of fields most
//! callers need while ignoring the rest. Field names follow the service's
//! casing (`ID`, `site_ID`, `URL`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;

/// Decode a response into one of the typed views.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Fields accepted when creating or editing a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// `publish`, `draft`, `pending` or `private`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Comma-separated category names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    /// Comma-separated tag names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// ISO 8601 publish date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Body of a new comment or reply. A plain string becomes `{"content": s}`.
#[derive(Debug, Clone, PartialEq)]
pub enum CommentBody {
    Text(String),
    Json(Value),
}

impl CommentBody {
    pub fn into_value(self) -> Value {
        match self {
            CommentBody::Text(content) => json!({ "content": content }),
            CommentBody::Json(value) => value,
        }
    }
}

impl From<&str> for CommentBody {
    fn from(content: &str) -> Self {
        CommentBody::Text(content.to_string())
    }
}

impl From<String> for CommentBody {
    fn from(content: String) -> Self {
        CommentBody::Text(content)
    }
}

impl From<Value> for CommentBody {
    fn from(value: Value) -> Self {
        CommentBody::Json(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReblogBody {
    pub destination_site_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteInfo {
    #[serde(rename = "ID")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "URL", default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostSummary {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "site_ID")]
    pub site_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostsList {
    pub found: u64,
    pub posts: Vec<PostSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentSummary {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: String,
    /// `false` for top-level comments, otherwise the parent comment.
    #[serde(default)]
    pub parent: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LikeState {
    pub i_like: bool,
    pub like_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReblogState {
    pub is_reblogged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_data_omits_unset_fields() {
        let data = PostData {
            title: Some("Hello".to_string()),
            status: Some("draft".to_string()),
            ..PostData::default()
        };
        assert_eq!(serde_json::to_value(&data).unwrap(), json!({ "title": "Hello", "status": "draft" }));
    }

    #[test]
    fn comment_body_variants() {
        assert_eq!(CommentBody::from("hi").into_value(), json!({ "content": "hi" }));
        let raw = json!({ "content": "hi", "parent": 3 });
        assert_eq!(CommentBody::from(raw.clone()).into_value(), raw);
    }

    #[test]
    fn decode_post_ignores_unknown_fields() {
        let post: PostSummary = decode(json!({
            "ID": 10,
            "site_ID": 1,
            "title": "T",
            "slug": "t",
            "status": "publish",
            "content": "<p>x</p>",
            "author": { "ID": 1 },
            "like_count": 0
        }))
        .unwrap();
        assert_eq!(post.id, 10);
        assert_eq!(post.site_id, 1);
        assert_eq!(post.slug, "t");
    }

    #[test]
    fn decode_reports_missing_fields() {
        let err = decode::<LikeState>(json!({ "i_like": true })).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn site_info_defaults_optional_fields() {
        let site: SiteInfo = decode(json!({ "ID": 1, "name": "Blog" })).unwrap();
        assert_eq!(site.description, "");
        assert_eq!(site.url, "");
    }
}
