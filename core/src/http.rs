//! HTTP transport types and the host-provided transport seam.
//!
//! # Design
//! Requests and responses are plain data. `WpCom` builds an `HttpRequest`,
//! hands it to a `Transport` supplied by the host, and parses the returned
//! `HttpResponse`. The crate itself never opens a socket, so any HTTP stack
//! (blocking or bridged from async) can sit behind the trait.
//!
//! A 4xx/5xx response is a successful round-trip from the transport's point
//! of view and must be returned as an `HttpResponse`, not as an error.

use std::fmt;
use std::sync::Arc;

/// HTTP method for a request. The REST API only uses `GET` for reads and
/// `POST` for every mutation, including deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries the encoded query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Error produced by a host transport when the round-trip itself failed
/// (DNS, connect, TLS, I/O).
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Executes an `HttpRequest` against the network.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport backed by a closure. Built with [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

/// Wrap a closure as a `Transport`.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(HttpRequest) -> Result<HttpResponse, TransportError>,
{
    FromFn(f)
}

impl<F> Transport for FromFn<F>
where
    F: Fn(HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (self.0)(request)
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn")
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost/me".to_string(),
            headers: vec![("Authorization".to_string(), "Bearer t".to_string())],
            body: None,
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = request();
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn closures_are_transports() {
        let transport = from_fn(|req| {
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: req.url,
            })
        });
        let response = transport.execute(request()).unwrap();
        assert_eq!(response.body, "http://localhost/me");
    }

    #[test]
    fn boxed_dyn_transport_forwards() {
        let transport: Box<dyn Transport> = Box::new(from_fn(|_req| Err("connection refused".into())));
        let err = transport.execute(request()).unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn success_range() {
        let mut response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 301;
        assert!(!response.is_success());
    }

    #[test]
    fn method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
    }
}
