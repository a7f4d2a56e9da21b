//! Error types for the WordPress.com client.
//!
//! # Design
//! The client adds no interpretation of its own to remote failures. A non-2xx
//! response carrying the service's `{"error": ..., "message": ...}` envelope
//! becomes `Remote` with both strings intact; anything else non-2xx lands in
//! `Http` with the raw body.

use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `WpCom` and the resource wrappers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with its standard error envelope.
    #[error("{code} (HTTP {status}): {message}")]
    Remote {
        status: u16,
        code: String,
        message: String,
    },

    /// The service returned a non-2xx status without an error envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The host transport could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(#[source] TransportError),

    /// A 2xx response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The operation needs an identifier that was never set.
    #[error("missing {0}")]
    MissingIdentifier(&'static str),
}

impl ApiError {
    /// HTTP status of the response that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } | ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The service's error code (`unknown_post`, `authorization_required`, ...).
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Remote { code, .. } => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_display_keeps_code_and_message() {
        let err = ApiError::Remote {
            status: 404,
            code: "unknown_post".to_string(),
            message: "Unknown post".to_string(),
        };
        assert_eq!(err.to_string(), "unknown_post (HTTP 404): Unknown post");
        assert!(err.is_not_found());
        assert_eq!(err.code(), Some("unknown_post"));
    }

    #[test]
    fn http_error_status() {
        let err = ApiError::Http {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.status(), Some(502));
        assert!(!err.is_not_found());
        assert_eq!(err.code(), None);
    }

    #[test]
    fn local_errors_have_no_status() {
        let err = ApiError::MissingIdentifier("post id");
        assert_eq!(err.to_string(), "missing post id");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn transport_error_keeps_source() {
        use std::error::Error as _;

        let err = ApiError::Transport("connection reset".into());
        assert_eq!(err.to_string(), "transport failed: connection reset");
        assert_eq!(err.source().unwrap().to_string(), "connection reset");
    }
}
