//! Site resource: `/sites/{site}`.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::client::{segment, WpCom};
use crate::comment::Comment;
use crate::error::ApiError;
use crate::http::Transport;
use crate::post::{Post, PostKey};
use crate::query::Query;

/// A site identifier: either the numeric blog id or the site's domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SiteId(String);

impl SiteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encoded path segment, or `MissingIdentifier` when the id is empty.
    pub(crate) fn segment(&self) -> Result<String, ApiError> {
        if self.0.is_empty() {
            return Err(ApiError::MissingIdentifier("site id"));
        }
        Ok(segment(&self.0))
    }
}

impl From<u64> for SiteId {
    fn from(id: u64) -> Self {
        SiteId(id.to_string())
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> Self {
        SiteId(id.to_string())
    }
}

impl From<String> for SiteId {
    fn from(id: String) -> Self {
        SiteId(id)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub struct Site<'a, T> {
    wpcom: &'a WpCom<T>,
    id: SiteId,
}

impl<'a, T: Transport> Site<'a, T> {
    pub(crate) fn new(wpcom: &'a WpCom<T>, id: SiteId) -> Self {
        Self { wpcom, id }
    }

    pub fn id(&self) -> &SiteId {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<SiteId>) {
        self.id = id.into();
    }

    fn path(&self, rest: &str) -> Result<String, ApiError> {
        Ok(format!("/sites/{}{rest}", self.id.segment()?))
    }

    /// Site name, description, URL and options.
    pub fn info(&self, query: &Query) -> Result<Value, ApiError> {
        self.wpcom.get(&self.path("")?, query)
    }

    /// Paged list of posts: `{"found": n, "posts": [...]}`.
    pub fn posts(&self, query: &Query) -> Result<Value, ApiError> {
        self.wpcom.get(&self.path("/posts")?, query)
    }

    /// Recent comments across every post of the site.
    pub fn comments(&self, query: &Query) -> Result<Value, ApiError> {
        self.wpcom.get(&self.path("/comments")?, query)
    }

    pub fn add_post<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ApiError> {
        self.post(PostKey::default()).add(body)
    }

    pub fn delete_post(&self, id: u64) -> Result<Value, ApiError> {
        self.post(id).delete()
    }

    pub fn post(&self, key: impl Into<PostKey>) -> Post<'a, T> {
        Post::new(self.wpcom, self.id.clone(), key.into())
    }

    /// Comment addressed by its own id; post-scoped operations on the
    /// returned value fail until created through `Post::comment`.
    pub fn comment(&self, id: u64) -> Comment<'a, T> {
        Comment::new(self.wpcom, self.id.clone(), None, Some(id))
    }
}
