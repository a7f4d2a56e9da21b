//! Post resource: `/sites/{site}/posts/{post}`.
//!
//! A post is addressed by numeric id or by slug. Reads fall back to the slug
//! form (`/posts/slug:{slug}`) when no id is set; every mutation requires
//! the id.

use serde::Serialize;
use serde_json::Value;

use crate::client::{segment, to_body, WpCom};
use crate::comment::Comment;
use crate::error::ApiError;
use crate::http::Transport;
use crate::like::Like;
use crate::query::Query;
use crate::reblog::Reblog;
use crate::site::SiteId;

/// How a `Post` is addressed. Both fields may be empty for a post that is
/// about to be created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostKey {
    pub id: Option<u64>,
    pub slug: Option<String>,
}

impl PostKey {
    pub fn id(id: u64) -> Self {
        Self {
            id: Some(id),
            slug: None,
        }
    }

    pub fn slug(slug: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: Some(slug.into()),
        }
    }
}

impl From<u64> for PostKey {
    fn from(id: u64) -> Self {
        PostKey::id(id)
    }
}

#[derive(Debug)]
pub struct Post<'a, T> {
    wpcom: &'a WpCom<T>,
    site: SiteId,
    id: Option<u64>,
    slug: Option<String>,
}

impl<'a, T: Transport> Post<'a, T> {
    pub(crate) fn new(wpcom: &'a WpCom<T>, site: SiteId, key: PostKey) -> Self {
        Self {
            wpcom,
            site,
            id: key.id,
            slug: key.slug.filter(|s| !s.is_empty()),
        }
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.slug = Some(slug.into()).filter(|s| !s.is_empty());
    }

    fn posts_path(&self) -> Result<String, ApiError> {
        Ok(format!("/sites/{}/posts", self.site.segment()?))
    }

    fn id_path(&self, rest: &str) -> Result<String, ApiError> {
        let id = self.id.ok_or(ApiError::MissingIdentifier("post id"))?;
        Ok(format!("{}/{id}{rest}", self.posts_path()?))
    }

    /// Fetch the post by id, or by slug when only the slug is known.
    pub fn get(&self, query: &Query) -> Result<Value, ApiError> {
        if self.id.is_none() {
            if self.slug.is_some() {
                return self.get_by_slug(query);
            }
            return Err(ApiError::MissingIdentifier("post id or slug"));
        }
        self.wpcom.get(&self.id_path("")?, query)
    }

    pub fn get_by_slug(&self, query: &Query) -> Result<Value, ApiError> {
        let slug = self.slug.as_deref().ok_or(ApiError::MissingIdentifier("post slug"))?;
        let path = format!("{}/slug:{}", self.posts_path()?, segment(slug));
        self.wpcom.get(&path, query)
    }

    /// Create a new post on the site. Identifiers of `self` are ignored.
    pub fn add<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ApiError> {
        let path = format!("{}/new", self.posts_path()?);
        self.wpcom.post(&path, &Query::new(), Some(to_body(body)?))
    }

    pub fn update<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ApiError> {
        let path = self.id_path("")?;
        self.wpcom.post(&path, &Query::new(), Some(to_body(body)?))
    }

    /// Trash the post. Deleting an already trashed post removes it.
    pub fn delete(&self) -> Result<Value, ApiError> {
        self.wpcom.post(&self.id_path("/delete")?, &Query::new(), None)
    }

    /// Users who liked the post.
    pub fn likes_list(&self, query: &Query) -> Result<Value, ApiError> {
        self.wpcom.get(&self.id_path("/likes")?, query)
    }

    /// Search the site for posts related to this one.
    pub fn related<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ApiError> {
        let path = self.id_path("/related")?;
        self.wpcom.post(&path, &Query::new(), Some(to_body(body)?))
    }

    pub fn like(&self) -> Like<'a, T> {
        Like::new(self.wpcom, self.site.clone(), self.id)
    }

    pub fn reblog(&self) -> Reblog<'a, T> {
        Reblog::new(self.wpcom, self.site.clone(), self.id)
    }

    /// A comment on this post. Pass `None` to add a new top-level comment.
    pub fn comment(&self, id: impl Into<Option<u64>>) -> Comment<'a, T> {
        Comment::new(self.wpcom, self.site.clone(), self.id, id.into())
    }

    /// Comments on this post, newest first.
    pub fn comments(&self, query: &Query) -> Result<Value, ApiError> {
        self.comment(None).replies(query)
    }
}
