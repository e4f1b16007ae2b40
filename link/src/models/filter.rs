use crate::error::{ArangoLinkError, Result};
use serde_json::Value;

/// A single equality condition on one field.
///
/// The only filter shape this adapter supports for update/delete is an
/// equality on the schema's primary key; richer predicates belong to the
/// query layer, not the write path.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field name
    pub field: String,

    /// Value the field must equal
    pub value: Value,
}

impl Filter {
    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }

    /// Render the filter value as a document key
    pub fn key_string(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Extract the primary key for an update.
///
/// The primary key must be the first filter. Trailing filters are tolerated
/// for legacy callers and ignored with a warning; any shape where the primary
/// key is not filter #1 is rejected before any network call.
pub fn primary_key_for_update(filters: &[Filter], primary_key: &str) -> Result<String> {
    let first = filters.first().ok_or_else(|| {
        ArangoLinkError::UnsupportedFilter(format!(
            "update requires a filter on the primary key '{}'",
            primary_key
        ))
    })?;
    if first.field != primary_key {
        return Err(ArangoLinkError::UnsupportedFilter(format!(
            "update filters must start with the primary key '{}', got '{}'",
            primary_key, first.field
        )));
    }
    if filters.len() > 1 {
        log::warn!(
            "[WRITE] Ignoring {} trailing filter(s) after primary key '{}'",
            filters.len() - 1,
            primary_key
        );
    }
    Ok(first.key_string())
}

/// Extract the primary key for a delete.
///
/// Exactly one filter, on the primary key; anything else is rejected before
/// any network call (filtered bulk delete is out of scope).
pub fn primary_key_for_delete(filters: &[Filter], primary_key: &str) -> Result<String> {
    match filters {
        [only] if only.field == primary_key => Ok(only.key_string()),
        [] => Err(ArangoLinkError::UnsupportedFilter(format!(
            "delete requires exactly one filter on the primary key '{}'",
            primary_key
        ))),
        _ => Err(ArangoLinkError::UnsupportedFilter(format!(
            "delete supports only a single primary-key filter on '{}'",
            primary_key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_accepts_trailing_filters() {
        let filters = vec![
            Filter::eq("_key", json!("abc")),
            Filter::eq("name", json!("ignored")),
        ];
        assert_eq!(primary_key_for_update(&filters, "_key").unwrap(), "abc");
    }

    #[test]
    fn test_update_rejects_non_pk_first() {
        let filters = vec![
            Filter::eq("name", json!("x")),
            Filter::eq("_key", json!("abc")),
        ];
        assert!(matches!(
            primary_key_for_update(&filters, "_key"),
            Err(ArangoLinkError::UnsupportedFilter(_))
        ));
    }

    #[test]
    fn test_update_rejects_empty() {
        assert!(primary_key_for_update(&[], "_key").is_err());
    }

    #[test]
    fn test_delete_requires_exactly_one() {
        let one = vec![Filter::eq("_key", json!("abc"))];
        assert_eq!(primary_key_for_delete(&one, "_key").unwrap(), "abc");

        let two = vec![
            Filter::eq("_key", json!("abc")),
            Filter::eq("name", json!("x")),
        ];
        assert!(primary_key_for_delete(&two, "_key").is_err());
        assert!(primary_key_for_delete(&[], "_key").is_err());
    }

    #[test]
    fn test_numeric_key_rendering() {
        let filters = vec![Filter::eq("_key", json!(42))];
        assert_eq!(primary_key_for_delete(&filters, "_key").unwrap(), "42");
    }
}
