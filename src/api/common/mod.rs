//
//  spotctl
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Spot API
//!
//! This module provides the error taxonomy shared by every layer of the client
//! (token refresh, dispatcher, generic CRUD, resource methods) together with the
//! Kubernetes-style envelope types re-exported from [`meta`].
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all client operations
//! - [`ErrorKind`] - The four failure categories callers branch on
//! - [`ObjectMeta`], [`ListMeta`], [`ResourceList`], [`DeleteResponse`] - envelopes
//!
//! # Example
//!
//! ```rust
//! use spotctl::api::common::{ApiError, ErrorKind};
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     match err.kind() {
//!         ErrorKind::Validation => "fix the arguments",
//!         ErrorKind::Transport => "check the network",
//!         ErrorKind::Api => "the server refused the request",
//!         ErrorKind::Internal => "the client could not encode or decode a payload",
//!     }
//! }
//!
//! let err = ApiError::validation("namespace is required");
//! assert_eq!(describe(&err), "fix the arguments");
//! ```

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

mod meta;

pub use meta::*;

/// Failure categories exposed to callers.
///
/// | Kind | Raised when |
/// |------|-------------|
/// | `Validation` | An argument is missing or malformed; no network I/O happened |
/// | `Transport` | The request could not be sent, completed, or was cancelled |
/// | `Api` | The server answered with a non-2xx status |
/// | `Internal` | A payload could not be encoded or decoded, or a file could not be read |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Api,
    Internal,
}

/// Unified error type for all Spot API operations.
///
/// Every failure the client can produce maps onto exactly one [`ErrorKind`] via
/// [`ApiError::kind`]. Once an HTTP response has been received, a non-2xx
/// status is always reported as [`ApiError::Api`], never as a transport error.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required argument was empty or invalid.
    #[error("{0}")]
    Validation(String),

    /// The request could not be sent or its body could not be read.
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The operation was abandoned because its context was cancelled or its
    /// deadline passed.
    #[error("{0}")]
    Cancelled(String),

    /// The server answered with a non-2xx status.
    ///
    /// `code` is the code from the error body when present, otherwise the HTTP
    /// status.
    #[error(
        "API error {code}: {message}{}",
        .details.as_ref().map(|d| format!(" ({d})")).unwrap_or_default()
    )]
    Api {
        code: u16,
        message: String,
        details: Option<String>,
    },

    /// Encoding, decoding or file I/O failed inside the client.
    #[error("{context}: {source}")]
    Internal {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            context: context.into(),
            source,
        }
    }

    pub fn internal<E>(context: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Internal {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Returns the failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport { .. } | Self::Cancelled(_) => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::Api,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Returns the API error code for [`ApiError::Api`] errors.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.code(), Some(401) | Some(403))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Builds an [`ApiError::Api`] from a non-2xx response.
    ///
    /// The body is decoded as `{code, message, details}`. A missing or zero
    /// `code` falls back to the HTTP status. An empty `message` falls back to
    /// an OAuth-style `error_description`/`error` field, then to the raw body.
    /// A body that is not a JSON object yields the raw body as the message.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let raw = body.trim();
        let fallback_message = || {
            if raw.is_empty() {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
            } else {
                raw.to_string()
            }
        };

        let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(raw) else {
            return Self::Api {
                code: status.as_u16(),
                message: fallback_message(),
                details: None,
            };
        };

        let code = envelope
            .code
            .filter(|code| *code != 0)
            .unwrap_or(status.as_u16());

        let message = [
            envelope.message,
            envelope.error_description,
            envelope.error.as_ref().and_then(text_of),
        ]
        .into_iter()
        .flatten()
        .find(|m| !m.is_empty())
        .unwrap_or_else(fallback_message);

        let details = envelope.details.as_ref().and_then(text_of);

        Self::Api {
            code,
            message,
            details,
        }
    }
}

/// Lenient shape of an error body.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    error_description: Option<String>,
}

fn text_of(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_code_and_message() {
        let err = ApiError::from_response(
            StatusCode::NOT_FOUND,
            r#"{"code":404,"message":"CloudSpace not found"}"#,
        );
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.code(), Some(404));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error 404: CloudSpace not found");
    }

    #[test]
    fn test_error_body_with_details() {
        let err = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"code":400,"message":"invalid spec","details":"bidPrice must be positive"}"#,
        );
        assert_eq!(
            err.to_string(),
            "API error 400: invalid spec (bidPrice must be positive)"
        );
    }

    #[test]
    fn test_missing_code_uses_status() {
        let err = ApiError::from_response(
            StatusCode::CONFLICT,
            r#"{"message":"already exists"}"#,
        );
        assert_eq!(err.code(), Some(409));

        let err = ApiError::from_response(StatusCode::CONFLICT, r#"{"code":0,"message":"x"}"#);
        assert_eq!(err.code(), Some(409));
    }

    #[test]
    fn test_non_json_body_becomes_message() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "upstream unavailable");
        match err {
            ApiError::Api {
                code,
                message,
                details,
            } => {
                assert_eq!(code, 502);
                assert_eq!(message, "upstream unavailable");
                assert!(details.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_uses_reason_phrase() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, "");
        assert_eq!(err.to_string(), "API error 401: Unauthorized");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_oauth_error_body() {
        let err = ApiError::from_response(
            StatusCode::FORBIDDEN,
            r#"{"error":"invalid_grant","error_description":"Unknown or invalid refresh token."}"#,
        );
        assert_eq!(
            err.to_string(),
            "API error 403: Unknown or invalid refresh token."
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ApiError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(
            ApiError::Cancelled("x".into()).kind(),
            ErrorKind::Transport
        );
        let decode = serde_json::from_str::<u8>("nope").unwrap_err();
        assert_eq!(
            ApiError::internal("decode", decode).kind(),
            ErrorKind::Internal
        );
    }
}
