//! Error types for arango-cli.
//!
//! Provides operator-friendly messages for the migrate command.

use arango_link::ArangoLinkError;
use std::fmt;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CLIError>;

/// Errors that can occur in the CLI
#[derive(Debug)]
pub enum CLIError {
    /// Error from the arango-link library
    LinkError(ArangoLinkError),

    /// One or more migrations reported a failure
    MigrationFailed(String),
}

impl fmt::Display for CLIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CLIError::LinkError(e) => write!(f, "{}", e),
            CLIError::MigrationFailed(msg) => write!(f, "Migration failed: {}", msg),
        }
    }
}

impl std::error::Error for CLIError {}

impl From<ArangoLinkError> for CLIError {
    fn from(err: ArangoLinkError) -> Self {
        CLIError::LinkError(err)
    }
}
