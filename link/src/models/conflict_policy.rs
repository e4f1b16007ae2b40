/// What to do when a write hits a unique-constraint conflict.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Surface the conflict as an invalid result (default)
    #[default]
    Raise,

    /// Treat the conflict as an idempotent no-op
    Ignore,

    /// Overwrite the conflicting document, replacing the listed fields
    ReplaceFields(Vec<String>),
}

impl ConflictPolicy {
    /// True when the policy asks the server to overwrite on conflict
    pub fn overwrites(&self) -> bool {
        matches!(self, ConflictPolicy::ReplaceFields(_))
    }

    /// True for the idempotent-skip policy
    pub fn ignores(&self) -> bool {
        matches!(self, ConflictPolicy::Ignore)
    }
}
