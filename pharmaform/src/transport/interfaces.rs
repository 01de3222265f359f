//! Transport boundary types.
//!
//! The submission adapter only ever talks to a [`Transport`]; it never
//! opens connections or reads credentials itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::errors::TransportError;

/// HTTP method of a form request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Create a record.
    Post,
    /// Replace an existing record.
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post => f.write_str("POST"),
            Self::Put => f.write_str("PUT"),
        }
    }
}

/// Opaque bearer credential, passed explicitly with each request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token text.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// One request handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/billing`.
    pub path: String,
    /// JSON body.
    pub body: Value,
    /// Credential to send, if any.
    pub auth_token: Option<AuthToken>,
    /// Correlation id, sent as `X-Request-Id`.
    pub request_id: Uuid,
}

impl TransportRequest {
    /// Creates a request with a fresh request id and no credential.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, body: Value) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            auth_token: None,
            request_id: Uuid::new_v4(),
        }
    }

    /// Attaches a credential.
    #[must_use]
    pub fn with_auth(mut self, token: Option<AuthToken>) -> Self {
        self.auth_token = token;
        self
    }

    /// Overrides the correlation id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }
}

/// What the server answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body, `Null` when empty.
    pub body: Value,
}

impl TransportResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// A `200 OK` with the given body.
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Non-blank `message` field of the body.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
    }

    /// The body's `data` field, when the server wraps its payload.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }
}

/// Sends form requests to the remote API.
///
/// Implementations report non-2xx answers either as `Ok` responses or as
/// [`TransportError::Status`]; the submission adapter treats both as
/// transport failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one request. No retries.
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
