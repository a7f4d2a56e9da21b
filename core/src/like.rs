//! The current user's like on a post.

use serde_json::Value;

use crate::client::WpCom;
use crate::error::ApiError;
use crate::http::Transport;
use crate::query::Query;
use crate::site::SiteId;

#[derive(Debug)]
pub struct Like<'a, T> {
    wpcom: &'a WpCom<T>,
    site: SiteId,
    post: Option<u64>,
}

impl<'a, T: Transport> Like<'a, T> {
    pub(crate) fn new(wpcom: &'a WpCom<T>, site: SiteId, post: Option<u64>) -> Self {
        Self { wpcom, site, post }
    }

    fn path(&self, rest: &str) -> Result<String, ApiError> {
        let post = self.post.ok_or(ApiError::MissingIdentifier("post id"))?;
        Ok(format!("/sites/{}/posts/{post}/likes{rest}", self.site.segment()?))
    }

    /// Whether the current user likes the post, plus the total like count.
    pub fn state(&self, query: &Query) -> Result<Value, ApiError> {
        self.wpcom.get(&self.path("/mine")?, query)
    }

    pub fn add(&self) -> Result<Value, ApiError> {
        self.wpcom.post(&self.path("/new")?, &Query::new(), None)
    }

    pub fn delete(&self) -> Result<Value, ApiError> {
        self.wpcom.post(&self.path("/mine/delete")?, &Query::new(), None)
    }
}
