//! Mock transport adapter for testing.
//!
//! Stubs responses per route and records every request, so tests can both
//! drive session operations and assert what went over the wire (notably
//! whether the bearer token was attached).
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new()
//!     .with_json(StubMethod::Post, "users/login/", json!({"access": "t"}))
//!     .with_error(StubMethod::Get, "users/me/", TransportError::Network("down".into()));
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{ApiResponse, Transport, TransportError};

/// HTTP method of a stubbed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubMethod {
    Get,
    Post,
    Put,
}

/// One request observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: StubMethod,
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

/// Mock implementation of the [`Transport`] port.
///
/// Routes without a stub return a `Network` error naming the path, which the
/// swallow-and-default operations treat as any other failure.
#[derive(Debug, Default)]
pub struct MockTransport {
    stubs: RwLock<HashMap<(StubMethod, String), Result<ApiResponse, TransportError>>>,
    requests: RwLock<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Creates a mock with no stubbed routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stubs a route with a full response.
    pub fn with_response(self, method: StubMethod, path: impl Into<String>, response: ApiResponse) -> Self {
        self.stubs
            .write()
            .unwrap()
            .insert((method, path.into()), Ok(response));
        self
    }

    /// Stubs a route with a `200 OK` JSON body.
    pub fn with_json(self, method: StubMethod, path: impl Into<String>, data: Value) -> Self {
        self.with_response(method, path, ApiResponse::ok(data))
    }

    /// Stubs a route to fail with the given error.
    pub fn with_error(self, method: StubMethod, path: impl Into<String>, error: TransportError) -> Self {
        self.stubs
            .write()
            .unwrap()
            .insert((method, path.into()), Err(error));
        self
    }

    /// Replaces a stub at runtime.
    pub fn set_response(&self, method: StubMethod, path: impl Into<String>, response: Result<ApiResponse, TransportError>) {
        self.stubs.write().unwrap().insert((method, path.into()), response);
    }

    /// Removes a stub, making the route fail as unreachable.
    pub fn remove_stub(&self, method: StubMethod, path: &str) {
        self.stubs.write().unwrap().remove(&(method, path.to_string()));
    }

    /// All requests observed so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Number of requests observed so far.
    pub fn request_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    /// The most recent request for a path, if the path was hit.
    pub fn last_request_to(&self, path: &str) -> Option<RecordedRequest> {
        self.requests
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.path == path)
            .cloned()
    }

    fn dispatch(
        &self,
        method: StubMethod,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        self.requests.write().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
            bearer: bearer.map(str::to_string),
        });

        self.stubs
            .read()
            .unwrap()
            .get(&(method, path.to_string()))
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Network(format!("no stub for {path}"))))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, bearer: Option<&str>) -> Result<ApiResponse, TransportError> {
        self.dispatch(StubMethod::Get, path, None, bearer)
    }

    async fn post(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        self.dispatch(StubMethod::Post, path, Some(body), bearer)
    }

    async fn put(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        self.dispatch(StubMethod::Put, path, Some(body), bearer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn stubbed_route_returns_its_response() {
        let transport = MockTransport::new().with_json(StubMethod::Get, "users/me/", json!({"id": 1}));

        let response = transport.get("users/me/", Some("t")).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.data, json!({"id": 1}));
    }

    #[tokio::test]
    async fn unstubbed_route_fails_as_unreachable() {
        let transport = MockTransport::new();

        let result = transport.get("teams/my/", None).await;

        assert!(matches!(result, Err(TransportError::Network(_))));
    }

    #[tokio::test]
    async fn stubbed_error_is_returned() {
        let transport = MockTransport::new().with_error(
            StubMethod::Post,
            "users/login/",
            TransportError::Status {
                status: 401,
                body: json!({"detail": "nope"}),
            },
        );

        let result = transport.post("users/login/", json!({}), None).await;

        assert!(matches!(result, Err(TransportError::Status { status: 401, .. })));
    }

    #[tokio::test]
    async fn requests_are_recorded_with_bearer_and_body() {
        let transport = MockTransport::new().with_json(StubMethod::Post, "users/login/", json!({}));

        transport
            .post("users/login/", json!({"email": "a@b.c"}), Some("tok"))
            .await
            .unwrap();

        let recorded = transport.last_request_to("users/login/").unwrap();
        assert_eq!(recorded.method, StubMethod::Post);
        assert_eq!(recorded.bearer.as_deref(), Some("tok"));
        assert_eq!(recorded.body, Some(json!({"email": "a@b.c"})));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn set_response_replaces_a_stub_at_runtime() {
        let transport = MockTransport::new().with_error(
            StubMethod::Get,
            "users/me/",
            TransportError::Network("down".into()),
        );

        assert!(transport.get("users/me/", None).await.is_err());

        transport.set_response(
            StubMethod::Get,
            "users/me/",
            Ok(ApiResponse::ok(json!({"id": 2}))),
        );

        assert!(transport.get("users/me/", None).await.is_ok());
    }
}
