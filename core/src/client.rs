//! Request dispatch for the WordPress.com REST API.
//!
//! # Design
//! `WpCom` owns the `Config` and the host transport and nothing else. Every
//! resource wrapper (`Site`, `Post`, `Comment`, `Like`, `Reblog`, `Me`)
//! borrows the client, composes an `Endpoint` from its identifiers and calls
//! `WpCom::request`. The round-trip is split the same way for every call:
//! `build_request` produces an `HttpRequest`, the transport executes it, and
//! `parse_response` turns the `HttpResponse` into JSON or an `ApiError`.
//! Both halves are public so hosts that drive their own I/O can use them
//! directly.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::me::Me;
use crate::query::Query;
use crate::site::{Site, SiteId};

/// A REST endpoint: HTTP verb plus a path relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: String,
}

impl Endpoint {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
        }
    }
}

/// Entry point of the client.
///
/// ```no_run
/// # use wpcom_core::{from_fn, Query, WpCom};
/// # let transport = from_fn(|_req| unimplemented!());
/// let wpcom = WpCom::new(transport, Some("token"));
/// let posts = wpcom.site("example.wordpress.com").posts(&Query::new().set("number", 10))?;
/// # Ok::<(), wpcom_core::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WpCom<T> {
    config: Config,
    transport: T,
}

impl<T: Transport> WpCom<T> {
    pub fn new(transport: T, token: Option<&str>) -> Self {
        Self::with_config(transport, Config::new(token))
    }

    pub fn with_config(transport: T, config: Config) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A site identified by numeric id or domain.
    pub fn site(&self, id: impl Into<SiteId>) -> Site<'_, T> {
        Site::new(self, id.into())
    }

    /// The user owning the configured token.
    pub fn me(&self) -> Me<'_, T> {
        Me::new(self)
    }

    /// Editorially curated posts across WordPress.com.
    pub fn freshly_pressed(&self, query: &Query) -> Result<Value, ApiError> {
        self.get("/freshly-pressed", query)
    }

    /// Build the `HttpRequest` for `endpoint` without executing it.
    pub fn build_request(&self, endpoint: &Endpoint, query: &Query, body: Option<&Value>) -> HttpRequest {
        let mut url = format!("{}{}", self.config.base_url(), endpoint.path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.encode());
        }

        let mut headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("user-agent".to_string(), self.config.user_agent().to_string()),
        ];
        if let Some(token) = self.config.token() {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }

        HttpRequest {
            method: endpoint.method,
            url,
            headers,
            body: body.map(Value::to_string),
        }
    }

    /// Build, execute and parse a single request.
    pub fn request(&self, endpoint: Endpoint, query: &Query, body: Option<Value>) -> Result<Value, ApiError> {
        let request = self.build_request(&endpoint, query, body.as_ref());
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.transport.execute(request).map_err(ApiError::Transport)?;
        debug!(status = response.status, path = %endpoint.path, "received response");

        parse_response(response).inspect_err(|err| {
            warn!(method = %endpoint.method, path = %endpoint.path, error = %err, "request failed");
        })
    }

    pub fn get(&self, path: &str, query: &Query) -> Result<Value, ApiError> {
        self.request(Endpoint::get(path), query, None)
    }

    pub fn post(&self, path: &str, query: &Query, body: Option<Value>) -> Result<Value, ApiError> {
        self.request(Endpoint::post(path), query, body)
    }
}

/// Turn a raw response into JSON, or into the error the service reported.
pub fn parse_response(response: HttpResponse) -> Result<Value, ApiError> {
    if response.is_success() {
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()));
    }

    let envelope = serde_json::from_str::<Value>(&response.body).ok().and_then(|v| {
        let code = v.get("error")?.as_str()?.to_string();
        let message = v.get("message")?.as_str()?.to_string();
        Some((code, message))
    });
    match envelope {
        Some((code, message)) => Err(ApiError::Remote {
            status: response.status,
            code,
            message,
        }),
        None => Err(ApiError::Http {
            status: response.status,
            body: response.body,
        }),
    }
}

/// Serialize a request payload into the JSON body sent to the service.
pub(crate) fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Percent-encode a single path segment.
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
