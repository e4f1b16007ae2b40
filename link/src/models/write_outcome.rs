use serde_json::Value;

/// Structured conflict information carried by an invalid outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A unique index rejected the write; carries the index name
    UniqueIndex(String),

    /// Generic failure identified only by its transport status code
    /// (the all-or-nothing batch path reports this)
    Status(u16),
}

/// Outcome of one write operation, as seen by the calling mapping layer.
///
/// Fatal errors are `Err(ArangoLinkError)`; everything here is a normal,
/// caller-decidable result.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// The write went through
    Ok {
        /// Number of documents affected
        affected: usize,
        /// Projections of the requested return fields, one row per document;
        /// `None` when the caller requested no fields
        rows: Option<Vec<Vec<Value>>>,
    },

    /// The write was rejected with structured conflict information
    Invalid(Vec<Violation>),

    /// The target record no longer exists (or its revision moved on)
    Stale,
}

impl WriteOutcome {
    /// Success with nothing to return
    pub fn empty() -> Self {
        WriteOutcome::Ok {
            affected: 0,
            rows: None,
        }
    }

    /// True for any `Ok` variant
    pub fn is_ok(&self) -> bool {
        matches!(self, WriteOutcome::Ok { .. })
    }
}
