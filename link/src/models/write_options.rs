use super::conflict_policy::ConflictPolicy;

/// System fields the server always returns; requesting only these never
/// requires the post-write document body.
pub const SYSTEM_FIELDS: [&str; 3] = ["_key", "_id", "_rev"];

/// Per-call directives for a write operation. No state persists across calls.
///
/// # Examples
///
/// ```rust
/// use arango_link::models::{ConflictPolicy, WriteOptions};
///
/// let opts = WriteOptions::new()
///     .returning(["_key", "email"])
///     .on_conflict(ConflictPolicy::Ignore);
/// assert!(opts.needs_return_new());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Ask the server for the post-write document body
    pub return_new: bool,

    /// Fields the caller wants back, projected from the decoded document
    pub return_fields: Vec<String>,

    /// Conflict-resolution directive
    pub on_conflict: ConflictPolicy,
}

impl WriteOptions {
    /// Options with all defaults (no returning, raise on conflict)
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicitly request the post-write document body
    pub fn return_new(mut self) -> Self {
        self.return_new = true;
        self
    }

    /// Set the fields to return
    pub fn returning<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.return_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the conflict policy
    pub fn on_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.on_conflict = policy;
        self
    }

    /// True when the operation must ask for the new document body: either
    /// requested explicitly, or the caller wants a field the server does not
    /// echo back on its own.
    pub fn needs_return_new(&self) -> bool {
        self.return_new
            || self
                .return_fields
                .iter()
                .any(|f| !SYSTEM_FIELDS.contains(&f.as_str()))
    }
}
