use super::index_descriptor::IndexDescriptor;
use super::schema_kind::SchemaKind;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Everything the adapter needs to know about one collection.
///
/// Owned by the calling mapping layer and read-only here. Built either
/// directly through the constructors or from reflected schema metadata.
///
/// # Examples
///
/// ```rust
/// use arango_link::models::{IndexDescriptor, SchemaDescriptor};
///
/// let schema = SchemaDescriptor::document("users")
///     .with_index(IndexDescriptor::new(["email"]));
/// assert_eq!(schema.source, "users");
/// ```
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    /// Collection name
    pub source: String,

    /// Document or edge, resolved once
    pub kind: SchemaKind,

    /// Primary key field name (`_key` for this store)
    pub primary_key: String,

    /// Fields tagged as foreign keys in the mapping layer
    pub foreign_keys: BTreeSet<String>,

    /// Declared indexes, created in declaration order on first write
    pub indexes: Vec<IndexDescriptor>,

    /// Declared collection creation options
    pub options: Map<String, Value>,
}

impl SchemaDescriptor {
    /// Descriptor for a document-kind collection
    pub fn document(source: impl Into<String>) -> Self {
        Self::new(source, SchemaKind::Document)
    }

    /// Descriptor for an edge-kind collection.
    ///
    /// Use [`SchemaKind::resolve_edge`] to build the kind from association
    /// metadata when endpoint targets are not known statically.
    pub fn edge(source: impl Into<String>, kind: SchemaKind) -> Self {
        Self::new(source, kind)
    }

    fn new(source: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            source: source.into(),
            kind,
            primary_key: "_key".to_string(),
            foreign_keys: BTreeSet::new(),
            indexes: Vec::new(),
            options: Map::new(),
        }
    }

    /// Declare an index
    pub fn with_index(mut self, index: IndexDescriptor) -> Self {
        self.indexes.push(index);
        self
    }

    /// Override the primary key field name
    pub fn with_primary_key(mut self, field: impl Into<String>) -> Self {
        self.primary_key = field.into();
        self
    }

    /// Tag fields as foreign keys
    pub fn with_foreign_keys<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.foreign_keys = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Declare collection creation options
    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = options;
        self
    }
}
