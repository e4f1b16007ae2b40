use serde_json::{Map, Value};

/// A database document as a JSON key/value mapping.
///
/// The mapping is unordered for transport purposes; the system fields
/// `_key`, `_id` and `_rev` are managed by the server.
pub type Document = Map<String, Value>;

/// One record to write, as an ordered sequence of `(field, value)` pairs.
///
/// The ordering matters for duplicate collapsing: a duplicate key keeps the
/// position of its first occurrence but takes the last value.
pub type FieldList = Vec<(String, Value)>;

/// Collapse a field list into a document.
///
/// # Examples
///
/// ```rust
/// use arango_link::models::collapse_fields;
/// use serde_json::json;
///
/// let doc = collapse_fields(&[
///     ("name".to_string(), json!("alice")),
///     ("name".to_string(), json!("bob")),
/// ]);
/// assert_eq!(doc.get("name"), Some(&json!("bob")));
/// ```
pub fn collapse_fields(fields: &[(String, Value)]) -> Document {
    let mut doc = Document::new();
    for (name, value) in fields {
        doc.insert(name.clone(), value.clone());
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collapse_keeps_last_value() {
        let doc = collapse_fields(&vec![
            ("a".to_string(), json!(1)),
            ("b".to_string(), json!(2)),
            ("a".to_string(), json!(3)),
        ]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("a"), Some(&json!(3)));
        assert_eq!(doc.get("b"), Some(&json!(2)));
    }
}
