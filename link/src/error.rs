//! Error types for arango-link.
//!
//! Conflict and staleness are *values* (`WriteOutcome::Invalid` /
//! `WriteOutcome::Stale`), not errors. Everything in this enum is fatal to the
//! operation that raised it and is never retried by this library.

use thiserror::Error;

/// Result type for arango-link operations
pub type Result<T> = std::result::Result<T, ArangoLinkError>;

/// Errors that can occur in the adapter and migration runner
#[derive(Error, Debug)]
pub enum ArangoLinkError {
    /// Bad schema metadata, index descriptor or static-mode violation
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Update/delete filter shape the adapter does not support
    #[error("Unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Error response from the database that maps to no richer outcome
    #[error("Server error{}: {message}", format_server_detail(.status, .error_num))]
    Server {
        /// HTTP status code, when the response carried one
        status: Option<u16>,
        /// Database-specific numeric error code (e.g. 1210)
        error_num: Option<i64>,
        /// Error message as reported by the server
        message: String,
    },

    /// Connection-level failure before any status code was received
    #[error("Network error: {0}")]
    Network(String),

    /// Request or response body could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Migration discovery or execution failure that aborts the run
    #[error("Migration error: {0}")]
    Migration(String),

    /// The applied-versions ledger has not been created yet
    #[error("Ledger not initialized: {0}")]
    LedgerNotInitialized(String),

    /// File I/O failure (migration files, ledger file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_server_detail(status: &Option<u16>, error_num: &Option<i64>) -> String {
    match (status, error_num) {
        (Some(s), Some(n)) => format!(" (status {}, code {})", s, n),
        (Some(s), None) => format!(" (status {})", s),
        (None, Some(n)) => format!(" (code {})", n),
        (None, None) => String::new(),
    }
}

impl From<serde_json::Error> for ArangoLinkError {
    fn from(err: serde_json::Error) -> Self {
        ArangoLinkError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let err = ArangoLinkError::Server {
            status: Some(409),
            error_num: Some(1210),
            message: "unique constraint violated".into(),
        };
        assert_eq!(
            err.to_string(),
            "Server error (status 409, code 1210): unique constraint violated"
        );

        let err = ArangoLinkError::Server {
            status: None,
            error_num: None,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "Server error: boom");
    }
}
