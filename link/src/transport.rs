//! Transport boundary to the document store's HTTP API.
//!
//! The adapter core issues exactly one blocking round trip per logical
//! operation through the [`Transport`] trait and never retries. The
//! production implementation is [`HttpTransport`] (reqwest, connection
//! pooling, builder-pattern construction); tests inject mocks.

use crate::auth::AuthProvider;
use crate::error::{ArangoLinkError, Result};
use log::debug;
use serde_json::Value;
use std::time::{Duration, Instant};

/// A successful HTTP response from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,

    /// Decoded JSON body (`null` when the body was empty)
    pub body: Value,
}

/// An error response or connection failure.
///
/// Connection-level failures carry neither a status nor an error number.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status code, when a response was received
    pub status: Option<u16>,

    /// Store-specific numeric error code (e.g. 1210), when present
    pub error_num: Option<i64>,

    /// Error message
    pub message: String,
}

impl ApiError {
    /// Escalate this transport error to a fatal adapter error
    pub fn into_fatal(self) -> ArangoLinkError {
        if self.status.is_none() && self.error_num.is_none() {
            ArangoLinkError::Network(self.message)
        } else {
            ArangoLinkError::Server {
                status: self.status,
                error_num: self.error_num,
                message: self.message,
            }
        }
    }
}

/// Result of one transport round trip
pub type TransportResult = std::result::Result<ApiResponse, ApiError>;

/// Blocking HTTP connection handle to the store.
///
/// Paths are rooted at the database (e.g. `/_api/document/users`); the
/// implementation owns base-URL resolution, authentication and pooling.
pub trait Transport {
    /// `GET <path>`
    fn get(&self, path: &str) -> TransportResult;

    /// `HEAD <path>`
    fn head(&self, path: &str) -> TransportResult;

    /// `POST <path>` with a JSON body
    fn post(&self, path: &str, body: &Value) -> TransportResult;

    /// `PATCH <path>` with a JSON body
    fn patch(&self, path: &str, body: &Value) -> TransportResult;

    /// `DELETE <path>`
    fn delete(&self, path: &str) -> TransportResult;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, path: &str) -> TransportResult {
        (**self).get(path)
    }

    fn head(&self, path: &str) -> TransportResult {
        (**self).head(path)
    }

    fn post(&self, path: &str, body: &Value) -> TransportResult {
        (**self).post(path, body)
    }

    fn patch(&self, path: &str, body: &Value) -> TransportResult {
        (**self).patch(path, body)
    }

    fn delete(&self, path: &str) -> TransportResult {
        (**self).delete(path)
    }
}

/// Production transport over reqwest's blocking client.
///
/// Use [`HttpTransport::builder`] to construct instances.
///
/// # Examples
///
/// ```rust,no_run
/// use arango_link::{AuthProvider, HttpTransport};
///
/// # fn example() -> arango_link::Result<()> {
/// let transport = HttpTransport::builder()
///     .base_url("http://localhost:8529/_db/mydb")
///     .auth(AuthProvider::basic_auth("root".into(), "secret".into()))
///     .timeout(std::time::Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    http_client: reqwest::blocking::Client,
    auth: AuthProvider,
}

impl HttpTransport {
    /// Create a new builder for configuring the transport
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> TransportResult {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http_client.request(method.clone(), &url);
        if let Some(body) = body {
            req = req.json(body);
        }
        req = self.auth.apply_to_request(req);

        let start = Instant::now();
        debug!("[TRANSPORT] {} {}", method, url);
        let response = req.send().map_err(|e| ApiError {
            status: None,
            error_num: None,
            message: e.to_string(),
        })?;

        let status = response.status();
        debug!(
            "[TRANSPORT] {} {} -> {} in {:?}",
            method,
            url,
            status,
            start.elapsed()
        );

        let body: Value = response.json().unwrap_or(Value::Null);
        if status.is_success() {
            Ok(ApiResponse {
                status: status.as_u16(),
                body,
            })
        } else {
            Err(decode_error(status.as_u16(), &body))
        }
    }
}

/// Decode the store's error body shape
/// (`{"error": true, "errorNum": 1210, "errorMessage": "..."}`).
fn decode_error(status: u16, body: &Value) -> ApiError {
    let error_num = body.get("errorNum").and_then(Value::as_i64);
    let message = body
        .get("errorMessage")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("request failed with status {}", status));
    ApiError {
        status: Some(status),
        error_num,
        message,
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> TransportResult {
        self.request(reqwest::Method::GET, path, None)
    }

    fn head(&self, path: &str) -> TransportResult {
        self.request(reqwest::Method::HEAD, path, None)
    }

    fn post(&self, path: &str, body: &Value) -> TransportResult {
        self.request(reqwest::Method::POST, path, Some(body))
    }

    fn patch(&self, path: &str, body: &Value) -> TransportResult {
        self.request(reqwest::Method::PATCH, path, Some(body))
    }

    fn delete(&self, path: &str) -> TransportResult {
        self.request(reqwest::Method::DELETE, path, None)
    }
}

/// Builder for configuring [`HttpTransport`] instances.
pub struct HttpTransportBuilder {
    base_url: Option<String>,
    timeout: Duration,
    auth: AuthProvider,
}

impl HttpTransportBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            auth: AuthProvider::none(),
        }
    }

    /// Set the base URL, including the database path
    /// (e.g. `http://localhost:8529/_db/mydb`)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.base_url = Some(url);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the authentication provider
    pub fn auth(mut self, auth: AuthProvider) -> Self {
        self.auth = auth;
        self
    }

    /// Build the transport
    pub fn build(self) -> Result<HttpTransport> {
        let base_url = self
            .base_url
            .ok_or_else(|| ArangoLinkError::Configuration("base_url is required".into()))?;

        // Keep-alive pooling: one handle serves many single-shot operations
        let http_client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ArangoLinkError::Configuration(e.to_string()))?;

        Ok(HttpTransport {
            base_url,
            http_client,
            auth: self.auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_requires_base_url() {
        assert!(HttpTransport::builder().build().is_err());
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let transport = HttpTransport::builder()
            .base_url("http://localhost:8529/")
            .build()
            .unwrap();
        assert_eq!(transport.base_url, "http://localhost:8529");
    }

    #[test]
    fn test_decode_error_body() {
        let err = decode_error(
            409,
            &json!({"error": true, "errorNum": 1210, "errorMessage": "unique constraint violated"}),
        );
        assert_eq!(err.status, Some(409));
        assert_eq!(err.error_num, Some(1210));
        assert_eq!(err.message, "unique constraint violated");
    }

    #[test]
    fn test_decode_error_without_body() {
        let err = decode_error(500, &Value::Null);
        assert_eq!(err.status, Some(500));
        assert_eq!(err.error_num, None);
        assert!(err.message.contains("500"));
    }

    #[test]
    fn test_network_error_escalates_to_network() {
        let err = ApiError {
            status: None,
            error_num: None,
            message: "connection refused".into(),
        };
        assert!(matches!(err.into_fatal(), ArangoLinkError::Network(_)));
    }
}
