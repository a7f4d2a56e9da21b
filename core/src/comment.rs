//! Comment resource.
//!
//! Reading, editing, replying to and deleting a comment only need the site
//! and comment ids (`/sites/{site}/comments/{id}`). Listing and creating
//! top-level comments go through the parent post
//! (`/sites/{site}/posts/{post}/replies`).

use serde_json::Value;

use crate::client::{to_body, WpCom};
use crate::error::ApiError;
use crate::http::Transport;
use crate::query::Query;
use crate::site::SiteId;
use crate::types::CommentBody;

#[derive(Debug)]
pub struct Comment<'a, T> {
    wpcom: &'a WpCom<T>,
    site: SiteId,
    post: Option<u64>,
    id: Option<u64>,
}

impl<'a, T: Transport> Comment<'a, T> {
    pub(crate) fn new(wpcom: &'a WpCom<T>, site: SiteId, post: Option<u64>, id: Option<u64>) -> Self {
        Self { wpcom, site, post, id }
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn post_id(&self) -> Option<u64> {
        self.post
    }

    pub fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    fn comment_path(&self, rest: &str) -> Result<String, ApiError> {
        let id = self.id.ok_or(ApiError::MissingIdentifier("comment id"))?;
        Ok(format!("/sites/{}/comments/{id}{rest}", self.site.segment()?))
    }

    fn replies_path(&self, rest: &str) -> Result<String, ApiError> {
        let post = self.post.ok_or(ApiError::MissingIdentifier("post id"))?;
        Ok(format!("/sites/{}/posts/{post}/replies{rest}", self.site.segment()?))
    }

    pub fn get(&self, query: &Query) -> Result<Value, ApiError> {
        self.wpcom.get(&self.comment_path("")?, query)
    }

    /// Comments on the parent post.
    pub fn replies(&self, query: &Query) -> Result<Value, ApiError> {
        self.wpcom.get(&self.replies_path("")?, query)
    }

    /// New top-level comment on the parent post.
    pub fn add(&self, body: impl Into<CommentBody>) -> Result<Value, ApiError> {
        let path = self.replies_path("/new")?;
        self.wpcom.post(&path, &Query::new(), Some(body.into().into_value()))
    }

    pub fn update(&self, body: impl Into<CommentBody>) -> Result<Value, ApiError> {
        let path = self.comment_path("")?;
        self.wpcom.post(&path, &Query::new(), Some(body.into().into_value()))
    }

    /// Reply to this comment.
    pub fn reply(&self, body: impl Into<CommentBody>) -> Result<Value, ApiError> {
        let path = self.comment_path("/replies/new")?;
        self.wpcom.post(&path, &Query::new(), Some(body.into().into_value()))
    }

    pub fn delete(&self) -> Result<Value, ApiError> {
        self.wpcom.post(&self.comment_path("/delete")?, &Query::new(), None)
    }

    /// Edit arbitrary fields (`status`, `date`, ...) with a typed payload.
    pub fn update_with<B: serde::Serialize + ?Sized>(&self, body: &B) -> Result<Value, ApiError> {
        let path = self.comment_path("")?;
        self.wpcom.post(&path, &Query::new(), Some(to_body(body)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::recording;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn string_bodies_become_content() {
        let wpcom = recording();
        wpcom.site(1).post(3).comment(None).add("First!").unwrap();

        let seen = wpcom.transport().seen.borrow();
        assert_eq!(seen[0].url, "http://api.test/sites/1/posts/3/replies/new");
        let body: Value = serde_json::from_str(seen[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "content": "First!" }));
    }

    #[test]
    fn site_level_operations_skip_the_post() {
        let wpcom = recording();
        let comment = wpcom.site("blog.example.com").comment(8);
        comment.get(&Query::new()).unwrap();
        comment.update(json!({ "content": "edited" })).unwrap();
        comment.reply("thanks").unwrap();
        comment.delete().unwrap();

        assert_eq!(
            wpcom.transport().urls(),
            vec![
                "http://api.test/sites/blog.example.com/comments/8",
                "http://api.test/sites/blog.example.com/comments/8",
                "http://api.test/sites/blog.example.com/comments/8/replies/new",
                "http://api.test/sites/blog.example.com/comments/8/delete",
            ]
        );
    }

    #[test]
    fn post_scoped_operations_need_a_post() {
        let wpcom = recording();
        let comment = wpcom.site(1).comment(8);
        assert!(matches!(
            comment.replies(&Query::new()),
            Err(ApiError::MissingIdentifier("post id"))
        ));
        assert!(matches!(comment.add("x"), Err(ApiError::MissingIdentifier("post id"))));
        assert!(wpcom.transport().seen.borrow().is_empty());
    }

    #[test]
    fn comment_operations_need_an_id() {
        let wpcom = recording();
        let mut comment = wpcom.site(1).post(3).comment(None);
        assert_eq!(comment.post_id(), Some(3));
        assert!(matches!(comment.delete(), Err(ApiError::MissingIdentifier("comment id"))));

        comment.set_id(4);
        comment.update_with(&json!({ "status": "approved" })).unwrap();
        assert_eq!(wpcom.transport().urls(), vec!["http://api.test/sites/1/comments/4"]);
    }
}
