//! Data models for the arango-link adapter.
//!
//! One type per module; everything is re-exported here for convenience.

pub mod adapter_config;
pub mod conflict_policy;
pub mod document;
pub mod filter;
pub mod index_descriptor;
pub mod schema_descriptor;
pub mod schema_kind;
pub mod write_options;
pub mod write_outcome;

pub use adapter_config::AdapterConfig;
pub use conflict_policy::ConflictPolicy;
pub use document::{collapse_fields, Document, FieldList};
pub use filter::{primary_key_for_delete, primary_key_for_update, Filter};
pub use index_descriptor::IndexDescriptor;
pub use schema_descriptor::SchemaDescriptor;
pub use schema_kind::{EdgeEndpoint, SchemaKind};
pub use write_options::{WriteOptions, SYSTEM_FIELDS};
pub use write_outcome::{Violation, WriteOutcome};
