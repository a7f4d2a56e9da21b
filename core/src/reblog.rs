//! Reblogging a post onto another site.

use serde::Serialize;
use serde_json::Value;

use crate::client::{to_body, WpCom};
use crate::error::ApiError;
use crate::http::Transport;
use crate::query::Query;
use crate::site::SiteId;
use crate::types::ReblogBody;

#[derive(Debug)]
pub struct Reblog<'a, T> {
    wpcom: &'a WpCom<T>,
    site: SiteId,
    post: Option<u64>,
}

impl<'a, T: Transport> Reblog<'a, T> {
    pub(crate) fn new(wpcom: &'a WpCom<T>, site: SiteId, post: Option<u64>) -> Self {
        Self { wpcom, site, post }
    }

    fn path(&self, rest: &str) -> Result<String, ApiError> {
        let post = self.post.ok_or(ApiError::MissingIdentifier("post id"))?;
        Ok(format!("/sites/{}/posts/{post}/reblogs{rest}", self.site.segment()?))
    }

    /// Whether the current user has reblogged the post.
    pub fn state(&self, query: &Query) -> Result<Value, ApiError> {
        self.wpcom.get(&self.path("/mine")?, query)
    }

    pub fn add<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ApiError> {
        let path = self.path("/new")?;
        self.wpcom.post(&path, &Query::new(), Some(to_body(body)?))
    }

    /// Reblog onto `destination`, optionally with a note.
    pub fn to(&self, destination: u64, note: Option<&str>) -> Result<Value, ApiError> {
        self.add(&ReblogBody {
            destination_site_id: destination,
            note: note.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::recording;
    use serde_json::json;

    #[test]
    fn to_sends_destination_and_note() {
        let wpcom = recording();
        wpcom.site(1).post(2).reblog().to(77, Some("worth a read")).unwrap();

        let seen = wpcom.transport().seen.borrow();
        assert_eq!(seen[0].url, "http://api.test/sites/1/posts/2/reblogs/new");
        let body: Value = serde_json::from_str(seen[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "destination_site_id": 77, "note": "worth a read" }));
    }

    #[test]
    fn note_is_omitted_when_absent() {
        let wpcom = recording();
        wpcom.site(1).post(2).reblog().to(77, None).unwrap();

        let seen = wpcom.transport().seen.borrow();
        let body: Value = serde_json::from_str(seen[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "destination_site_id": 77 }));
    }

    #[test]
    fn state_path() {
        let wpcom = recording();
        wpcom.site(1).post(2).reblog().state(&Query::new()).unwrap();
        assert_eq!(wpcom.transport().urls(), vec!["http://api.test/sites/1/posts/2/reblogs/mine"]);
    }
}
