use crate::error::{ArangoLinkError, Result};
use std::collections::BTreeMap;

/// One endpoint of an edge schema: the relational field carrying the
/// reference and the collection it points into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeEndpoint {
    /// Field name holding the endpoint reference (conventionally `_from` / `_to`)
    pub field: String,

    /// Collection that bare keys in this field are qualified against
    pub target_collection: String,
}

impl EdgeEndpoint {
    /// Create an endpoint descriptor
    pub fn new(field: impl Into<String>, target_collection: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            target_collection: target_collection.into(),
        }
    }
}

/// Schema flavor, resolved once from descriptor metadata.
///
/// Edge schemas carry the two designated endpoint fields and their target
/// collections; documents need no extra information. Branching on this enum
/// replaces any runtime inspection of the schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    /// Plain document collection
    Document,

    /// Edge collection with resolved `from`/`to` endpoints
    Edge {
        /// Source endpoint
        from: EdgeEndpoint,
        /// Target endpoint
        to: EdgeEndpoint,
    },
}

impl SchemaKind {
    /// Resolve an edge kind from association metadata.
    ///
    /// `associations` maps an owner field name to the collection its schema
    /// references. Both designated endpoint fields must resolve; a missing
    /// association is a configuration error raised before any network call.
    pub fn resolve_edge(
        from_field: &str,
        to_field: &str,
        associations: &BTreeMap<String, String>,
    ) -> Result<Self> {
        let resolve = |field: &str| -> Result<EdgeEndpoint> {
            let target = associations.get(field).ok_or_else(|| {
                ArangoLinkError::Configuration(format!(
                    "edge endpoint field '{}' has no association to resolve its target collection",
                    field
                ))
            })?;
            Ok(EdgeEndpoint::new(field, target.clone()))
        };
        Ok(SchemaKind::Edge {
            from: resolve(from_field)?,
            to: resolve(to_field)?,
        })
    }

    /// Collection type code used by the HTTP API (2 = document, 3 = edge)
    pub fn type_code(&self) -> u8 {
        match self {
            SchemaKind::Document => 2,
            SchemaKind::Edge { .. } => 3,
        }
    }
}
