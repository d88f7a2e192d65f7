//! Single-attempt HTTP transport against the configured base URL.
//!
//! Every call is exactly one request; retry and endpoint-trial policy live a
//! layer up in [`crate::resolver`].

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// HTTP transport for the remote API.
///
/// Builds full URLs from the configured base URL plus a request path, sends
/// JSON, and maps responses onto the typed failure taxonomy. Holds one shared
/// connection pool.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    /// HTTP client.
    client: reqwest::Client,
    /// Base URL, without a trailing slash.
    base_url: String,
}

impl ApiTransport {
    /// Create a new transport from client configuration.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// The configured base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a single request and return the parsed JSON payload.
    ///
    /// - A request that never reaches the server fails [`ClientError::Network`].
    /// - A non-success status fails [`ClientError::HttpStatus`], carrying a
    ///   human-readable message mined from a `{"message": ...}` error body
    ///   when the server provides one.
    /// - A success status whose body is not JSON fails [`ClientError::Parse`].
    ///   An entirely empty body is treated as JSON `null`; some backends omit
    ///   bodies on delete.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` as described above. Never retries.
    #[instrument(skip(self, body), fields(base = %self.base_url))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{path}", self.base_url);

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from));
            debug!(status = status.as_u16(), ?message, "non-success response");
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let payload: Value = serde_json::from_str(&text)?;
        Ok(payload)
    }

    /// GET a path.
    ///
    /// # Errors
    ///
    /// See [`ApiTransport::request`].
    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::GET, path, None).await
    }

    /// POST a JSON body to a path.
    ///
    /// # Errors
    ///
    /// See [`ApiTransport::request`].
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// PUT a JSON body to a path.
    ///
    /// # Errors
    ///
    /// See [`ApiTransport::request`].
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// DELETE a path.
    ///
    /// # Errors
    ///
    /// See [`ApiTransport::request`].
    pub async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::DELETE, path, None).await
    }
}
