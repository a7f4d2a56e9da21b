//! Client for the WordPress.com REST API (v1).
//!
//! # Overview
//! `WpCom` holds the configuration and a host-supplied `Transport`. Resource
//! wrappers borrow it and map each method onto one endpoint:
//!
//! ```text
//! wpcom.site(id)                     /sites/{site}
//!      .post(id | slug)              /sites/{site}/posts/{id} | slug:{slug}
//!           .comment(id)             /sites/{site}/comments/{id}
//!           .like()                  /sites/{site}/posts/{id}/likes/...
//!           .reblog()                /sites/{site}/posts/{id}/reblogs/...
//! wpcom.me()                         /me
//! ```
//!
//! # Design
//! - The crate performs no network I/O; it builds `HttpRequest`s and parses
//!   `HttpResponse`s, and the host's `Transport` runs the round-trip.
//! - Operations return the service's JSON as `serde_json::Value`; the
//!   structs in `types` are optional typed views.
//! - Remote errors are passed through unchanged as `ApiError::Remote`.
//! - Missing identifiers are caught before any request is sent.

pub mod client;
pub mod comment;
pub mod config;
pub mod error;
pub mod http;
pub mod like;
pub mod me;
pub mod post;
pub mod query;
pub mod reblog;
pub mod site;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::{parse_response, Endpoint, WpCom};
pub use comment::Comment;
pub use config::Config;
pub use error::ApiError;
pub use http::{from_fn, HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use like::Like;
pub use me::Me;
pub use post::{Post, PostKey};
pub use query::Query;
pub use reblog::Reblog;
pub use site::{Site, SiteId};
pub use types::{CommentBody, PostData, ReblogBody};
