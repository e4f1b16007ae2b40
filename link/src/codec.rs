//! Conversion between field lists and the store's JSON document shape.
//!
//! Two concerns live here: endpoint qualification for edge schemas on the
//! way in, and system-key normalization on the way out. The store abbreviates
//! its system attributes to positional labels on the wire; decoding restores
//! the canonical names.

use crate::error::{ArangoLinkError, Result};
use crate::models::{collapse_fields, Document, FieldList, SchemaDescriptor, SchemaKind};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Positional system labels and their canonical names, in the store's
/// attribute translation order.
const SYSTEM_KEY_TRANSLATIONS: [(&str, &str); 5] = [
    ("1", "_key"),
    ("2", "_rev"),
    ("3", "_id"),
    ("4", "_from"),
    ("5", "_to"),
];

fn qualified_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_\-]+/[A-Za-z0-9_\-]+$").expect("valid pattern")
    })
}

/// Encode a field list into a document for transport.
///
/// Document kind: the identity transform, collapsed into a mapping.
/// Edge kind: foreign-key-tagged fields are dropped except the two designated
/// endpoint fields, whose values are rewritten to fully-qualified
/// `"<collection>/<key>"` identifiers.
pub fn encode(fields: &FieldList, schema: &SchemaDescriptor) -> Result<Document> {
    match &schema.kind {
        SchemaKind::Document => Ok(collapse_fields(fields)),
        SchemaKind::Edge { from, to } => {
            let mut doc = Document::new();
            for (name, value) in fields {
                let endpoint = if *name == from.field {
                    Some(from)
                } else if *name == to.field {
                    Some(to)
                } else {
                    None
                };
                match endpoint {
                    Some(endpoint) => {
                        doc.insert(
                            name.clone(),
                            qualify_endpoint(value, &endpoint.target_collection)?,
                        );
                    }
                    None if schema.foreign_keys.contains(name) => {
                        // Relational foreign keys have no meaning inside an edge document
                        continue;
                    }
                    None => {
                        doc.insert(name.clone(), value.clone());
                    }
                }
            }
            Ok(doc)
        }
    }
}

/// Encode a field list as a flat document, ignoring the schema kind.
///
/// Partial updates never rewrite endpoints.
pub fn encode_flat(fields: &FieldList) -> Document {
    collapse_fields(fields)
}

/// Qualify an endpoint reference. Already-qualified values
/// (`<identifier>/<identifier>`) pass through unchanged; bare keys get the
/// target collection prepended.
fn qualify_endpoint(value: &Value, target_collection: &str) -> Result<Value> {
    let key = value.as_str().ok_or_else(|| {
        ArangoLinkError::Configuration(format!(
            "edge endpoint value must be a string, got: {}",
            value
        ))
    })?;
    if qualified_id_pattern().is_match(key) {
        Ok(Value::String(key.to_string()))
    } else {
        Ok(Value::String(format!("{}/{}", target_collection, key)))
    }
}

/// Decode a response body into a document.
///
/// When return-new was requested and the body nests the post-write document
/// under `"new"`, unwrap it; otherwise rename the positional system labels to
/// their canonical names. Non-object bodies decode to `None`.
pub fn decode(body: &Value, requested_return_new: bool) -> Option<Document> {
    let map = body.as_object()?;
    if requested_return_new {
        if let Some(Value::Object(new_doc)) = map.get("new") {
            return Some(rename_system_keys(new_doc));
        }
    }
    Some(rename_system_keys(map))
}

/// Rename positional system labels to `_key` / `_rev` / `_id` / `_from` /
/// `_to`; all other keys pass through unchanged.
fn rename_system_keys(map: &Document) -> Document {
    let mut out = Document::new();
    for (key, value) in map {
        let canonical = SYSTEM_KEY_TRANSLATIONS
            .iter()
            .find(|(label, _)| *label == key.as_str())
            .map(|(_, name)| (*name).to_string())
            .unwrap_or_else(|| key.clone());
        out.insert(canonical, value.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EdgeEndpoint, SchemaDescriptor, SchemaKind};
    use serde_json::json;

    fn edge_schema() -> SchemaDescriptor {
        SchemaDescriptor::edge(
            "follows",
            SchemaKind::Edge {
                from: EdgeEndpoint::new("_from", "users"),
                to: EdgeEndpoint::new("_to", "users"),
            },
        )
        .with_foreign_keys(["_from", "_to", "group_id"])
    }

    #[test]
    fn test_document_encode_is_identity() {
        let schema = SchemaDescriptor::document("users");
        let fields = vec![
            ("name".to_string(), json!("alice")),
            ("age".to_string(), json!(30)),
        ];
        let doc = encode(&fields, &schema).unwrap();
        assert_eq!(doc.get("name"), Some(&json!("alice")));
        assert_eq!(doc.get("age"), Some(&json!(30)));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_edge_encode_qualifies_bare_keys() {
        let fields = vec![
            ("_from".to_string(), json!("abc")),
            ("_to".to_string(), json!("users/def")),
            ("weight".to_string(), json!(1)),
        ];
        let doc = encode(&fields, &edge_schema()).unwrap();
        assert_eq!(doc.get("_from"), Some(&json!("users/abc")));
        assert_eq!(doc.get("_to"), Some(&json!("users/def")));
        assert_eq!(doc.get("weight"), Some(&json!(1)));
    }

    #[test]
    fn test_edge_encode_drops_foreign_keys() {
        let fields = vec![
            ("_from".to_string(), json!("a")),
            ("_to".to_string(), json!("b")),
            ("group_id".to_string(), json!("g1")),
        ];
        let doc = encode(&fields, &edge_schema()).unwrap();
        assert!(!doc.contains_key("group_id"));
    }

    #[test]
    fn test_edge_encode_rejects_non_string_endpoint() {
        let fields = vec![("_from".to_string(), json!(5))];
        assert!(matches!(
            encode(&fields, &edge_schema()),
            Err(ArangoLinkError::Configuration(_))
        ));
    }

    #[test]
    fn test_decode_unwraps_new_document() {
        let body = json!({"1": "k1", "new": {"_key": "k1", "email": "a@b.c"}});
        let doc = decode(&body, true).unwrap();
        assert_eq!(doc.get("email"), Some(&json!("a@b.c")));
        assert_eq!(doc.get("_key"), Some(&json!("k1")));
    }

    #[test]
    fn test_decode_renames_system_keys() {
        let body = json!({"1": "k1", "2": "r1", "3": "users/k1", "extra": true});
        let doc = decode(&body, false).unwrap();
        assert_eq!(doc.get("_key"), Some(&json!("k1")));
        assert_eq!(doc.get("_rev"), Some(&json!("r1")));
        assert_eq!(doc.get("_id"), Some(&json!("users/k1")));
        assert_eq!(doc.get("extra"), Some(&json!(true)));
    }

    #[test]
    fn test_decode_without_wrapper_when_return_new() {
        // return-new requested but the store answered with plain system keys
        let body = json!({"1": "k1"});
        let doc = decode(&body, true).unwrap();
        assert_eq!(doc.get("_key"), Some(&json!("k1")));
    }

    #[test]
    fn test_decode_non_object_body() {
        assert!(decode(&json!("nope"), false).is_none());
        assert!(decode(&Value::Null, true).is_none());
    }
}
