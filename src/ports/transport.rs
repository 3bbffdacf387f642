//! Transport port for backend API access.
//!
//! The session core treats HTTP as an opaque request/response collaborator:
//! it hands over a path, an optional JSON body, and an optional bearer
//! token, and gets back a status plus decoded JSON. Error responses keep
//! their body, since the server puts human-readable text under `detail` or
//! `error` and the session layer surfaces that text to users.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Decoded response from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,

    /// Decoded JSON body; `Value::Null` when the body was empty.
    pub data: Value,
}

impl ApiResponse {
    pub fn ok(data: Value) -> Self {
        Self { status: 200, data }
    }
}

/// Errors produced by a transport implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    ///
    /// `body` retains the decoded error payload so callers can extract the
    /// server-supplied message.
    #[error("request failed with status {status}")]
    Status { status: u16, body: Value },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be interpreted.
    #[error("malformed response payload: {0}")]
    Decode(String),
}

impl TransportError {
    /// Server-supplied `detail` text, if the error body carried one.
    pub fn detail(&self) -> Option<&str> {
        self.body_field("detail")
    }

    /// Server-supplied `error` text. The password-reset endpoints use this
    /// key instead of `detail`.
    pub fn error_text(&self) -> Option<&str> {
        self.body_field("error")
    }

    fn body_field(&self, key: &str) -> Option<&str> {
        match self {
            TransportError::Status { body, .. } => body.get(key)?.as_str(),
            _ => None,
        }
    }
}

/// HTTP access to the backend API.
///
/// # Contract
///
/// Implementations must:
/// - Decode JSON bodies for success and error responses alike
/// - Return `TransportError::Status` with the decoded body for non-2xx
///   responses
/// - Attach `Authorization: Bearer <token>` when a bearer is given
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, bearer: Option<&str>) -> Result<ApiResponse, TransportError>;

    async fn post(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError>;

    async fn put(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError>;
}
