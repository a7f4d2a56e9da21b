//! The authenticated user.

use serde_json::Value;

use crate::client::WpCom;
use crate::error::ApiError;
use crate::http::Transport;
use crate::query::Query;

#[derive(Debug)]
pub struct Me<'a, T> {
    wpcom: &'a WpCom<T>,
}

impl<'a, T: Transport> Me<'a, T> {
    pub(crate) fn new(wpcom: &'a WpCom<T>) -> Self {
        Self { wpcom }
    }

    /// Profile of the user owning the token.
    pub fn info(&self, query: &Query) -> Result<Value, ApiError> {
        self.wpcom.get("/me", query)
    }

    /// Sites the user is a member of.
    pub fn sites(&self, query: &Query) -> Result<Value, ApiError> {
        self.wpcom.get("/me/sites", query)
    }

    /// Posts the user has liked.
    pub fn likes(&self, query: &Query) -> Result<Value, ApiError> {
        self.wpcom.get("/me/likes", query)
    }
}
