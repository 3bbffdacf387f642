//! HTTP transport adapter backed by `reqwest`.
//!
//! Resolves relative API paths against the configured base URL, attaches
//! the bearer token when one is given, and decodes JSON bodies for success
//! and error responses alike.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::ports::{ApiResponse, Transport, TransportError};

/// Production implementation of the [`Transport`] port.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport against the configured backend.
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn apply_bearer(
        builder: reqwest::RequestBuilder,
        bearer: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match bearer {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<ApiResponse, TransportError> {
        let response = builder.send().await.map_err(|e| {
            tracing::debug!("request failed before a response arrived: {}", e);
            TransportError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            // Error bodies are decoded best-effort; a non-JSON error page
            // still yields a Status error, just without server text.
            let body = serde_json::from_str(&text).unwrap_or(Value::Null);
            return Err(TransportError::Status { status, body });
        }

        let data = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))?
        };

        Ok(ApiResponse { status, data })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, bearer: Option<&str>) -> Result<ApiResponse, TransportError> {
        let builder = Self::apply_bearer(self.client.get(self.url(path)), bearer);
        self.execute(builder).await
    }

    async fn post(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        let builder = Self::apply_bearer(self.client.post(self.url(path)).json(&body), bearer);
        self.execute(builder).await
    }

    async fn put(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        let builder = Self::apply_bearer(self.client.put(self.url(path)).json(&body), bearer);
        self.execute(builder).await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_transport(base_url: &str) -> HttpTransport {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        HttpTransport::new(&config)
    }

    #[test]
    fn url_joins_base_and_path() {
        let transport = test_transport("http://127.0.0.1:8000/api");
        assert_eq!(
            transport.url("users/login/"),
            "http://127.0.0.1:8000/api/users/login/"
        );
    }

    #[test]
    fn url_tolerates_slashes_on_both_sides() {
        let transport = test_transport("http://127.0.0.1:8000/api/");
        assert_eq!(
            transport.url("/users/me/"),
            "http://127.0.0.1:8000/api/users/me/"
        );
    }

    #[test]
    fn http_transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpTransport>();
    }
}
