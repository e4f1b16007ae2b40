//! Authentication provider for the document store.
//!
//! Handles HTTP Basic Auth and bearer tokens, attaching the appropriate
//! Authorization header to outgoing requests.

use base64::{engine::general_purpose, Engine as _};

/// Authentication credentials for the database server.
///
/// # Examples
///
/// ```rust
/// use arango_link::AuthProvider;
///
/// // HTTP Basic Auth (the store's default root account)
/// let auth = AuthProvider::basic_auth("root".to_string(), "password".to_string());
///
/// // Bearer token authentication
/// let auth = AuthProvider::bearer_token("eyJhbGc...".to_string());
///
/// // No authentication
/// let auth = AuthProvider::none();
/// ```
#[derive(Debug, Clone)]
pub enum AuthProvider {
    /// HTTP Basic Auth (username, password)
    BasicAuth(String, String),

    /// Bearer token authentication
    BearerToken(String),

    /// No authentication
    None,
}

impl AuthProvider {
    /// Create HTTP Basic Auth credentials
    pub fn basic_auth(username: String, password: String) -> Self {
        Self::BasicAuth(username, password)
    }

    /// Create bearer token authentication
    pub fn bearer_token(token: String) -> Self {
        Self::BearerToken(token)
    }

    /// No authentication
    pub fn none() -> Self {
        Self::None
    }

    /// Attach authentication headers to an HTTP request builder.
    ///
    /// - BasicAuth: `Authorization: Basic <base64(username:password)>` (RFC 7617)
    /// - BearerToken: `Authorization: Bearer <token>`
    /// - None: no headers
    pub fn apply_to_request(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match self {
            Self::BasicAuth(username, password) => {
                let credentials = format!("{}:{}", username, password);
                let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
                request.header("Authorization", format!("Basic {}", encoded))
            }
            Self::BearerToken(token) => request.bearer_auth(token),
            Self::None => request,
        }
    }
}
