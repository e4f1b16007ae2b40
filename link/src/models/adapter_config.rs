/// Repository-level configuration for the write adapter.
#[derive(Debug, Clone, Default)]
pub struct AdapterConfig {
    /// When true, missing collections are never created on the fly; writes
    /// against them fail and the operator is told to run migrations.
    pub static_schema: bool,
}

impl AdapterConfig {
    /// Dynamic configuration: missing collections are provisioned lazily
    pub fn new() -> Self {
        Self::default()
    }

    /// Static configuration: schema changes happen only through migrations
    pub fn static_schema() -> Self {
        Self {
            static_schema: true,
        }
    }
}
