//! Classification of store responses into the adapter's result taxonomy.
//!
//! The rule order is load-bearing: unique-constraint violations must be
//! recognized before staleness, and staleness before the generic fatal case.

use crate::codec;
use crate::error::Result;
use crate::models::{ConflictPolicy, Document, Violation};
use crate::transport::TransportResult;
use regex::Regex;
use std::sync::OnceLock;

/// Store error code for a unique-constraint violation
pub const ERR_UNIQUE_CONSTRAINT: i64 = 1210;

/// Store error code for document-not-found / revision staleness
pub const ERR_DOCUMENT_NOT_FOUND: i64 = 1202;

/// Store error code for a duplicate collection/index name
/// (benign only during provisioning)
pub const ERR_DUPLICATE_NAME: i64 = 1207;

/// Intermediate classification of one response, before the adapter maps it
/// onto the caller-facing outcome shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpreted {
    /// The operation succeeded; the decoded document, when one came back
    Success(Option<Document>),

    /// The operation was rejected with structured conflict information
    Invalid(Vec<Violation>),

    /// The target record no longer exists or its revision moved on
    Stale,
}

fn unique_index_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"in index (\S+) of type").expect("valid pattern"))
}

/// Pull the offending index name out of a 1210 error message
fn extract_unique_index(message: &str) -> Option<String> {
    unique_index_pattern()
        .captures(message)
        .map(|c| c[1].to_string())
}

/// Classify one transport result.
///
/// Priority order:
/// 1. success, return-new requested, `"new"` wrapper present → success from
///    the wrapper;
/// 2. success otherwise → success with system-key renaming;
/// 3. error 1210 under [`ConflictPolicy::Ignore`] → success with no document
///    (idempotent skip);
/// 4. error 1210 otherwise → invalid, carrying the offending index name;
/// 5. error 1202 (or a 404 status) → stale;
/// 6. anything else → fatal, code and message propagated, never retried.
pub fn interpret(
    result: TransportResult,
    requested_return_new: bool,
    on_conflict: &ConflictPolicy,
) -> Result<Interpreted> {
    match result {
        Ok(response) => Ok(Interpreted::Success(codec::decode(
            &response.body,
            requested_return_new,
        ))),
        Err(error) => match error.error_num {
            Some(ERR_UNIQUE_CONSTRAINT) if on_conflict.ignores() => {
                log::debug!("[WRITE] Unique conflict ignored per conflict policy");
                Ok(Interpreted::Success(None))
            }
            Some(ERR_UNIQUE_CONSTRAINT) => {
                let violation = match extract_unique_index(&error.message) {
                    Some(index) => Violation::UniqueIndex(index),
                    None => Violation::Status(error.status.unwrap_or(0)),
                };
                Ok(Interpreted::Invalid(vec![violation]))
            }
            Some(ERR_DOCUMENT_NOT_FOUND) => Ok(Interpreted::Stale),
            _ if error.status == Some(404) => Ok(Interpreted::Stale),
            _ => Err(error.into_fatal()),
        },
    }
}
