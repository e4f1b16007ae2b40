//! The write-path adapter: insert, insert-many, update and delete.
//!
//! Each operation compiles one HTTP request from the caller's field lists,
//! filters and conflict directives, provisions the collection lazily when
//! allowed, and normalizes the response through the interpreter. Exactly one
//! network round trip per logical operation besides provisioning; no retries.

use crate::codec;
use crate::error::Result;
use crate::interpret::{interpret, Interpreted};
use crate::models::{
    primary_key_for_delete, primary_key_for_update, AdapterConfig, Document, FieldList, Filter,
    SchemaDescriptor, Violation, WriteOptions, WriteOutcome,
};
use crate::options::build_options;
use crate::provision;
use crate::transport::Transport;
use log::debug;
use serde_json::Value;

/// The write adapter. Holds the repository configuration and the connection
/// handle; each call is otherwise self-contained.
///
/// # Examples
///
/// ```rust,no_run
/// use arango_link::models::{SchemaDescriptor, WriteOptions};
/// use arango_link::{AdapterConfig, HttpTransport, WriteAdapter};
/// use serde_json::json;
///
/// # fn example() -> arango_link::Result<()> {
/// let transport = HttpTransport::builder()
///     .base_url("http://localhost:8529/_db/mydb")
///     .build()?;
/// let adapter = WriteAdapter::new(AdapterConfig::new(), transport);
///
/// let schema = SchemaDescriptor::document("users");
/// let fields = vec![("email".to_string(), json!("a@b.c"))];
/// let outcome = adapter.insert(&schema, &fields, &WriteOptions::new())?;
/// # Ok(())
/// # }
/// ```
pub struct WriteAdapter<T: Transport> {
    config: AdapterConfig,
    transport: T,
}

impl<T: Transport> WriteAdapter<T> {
    /// Create an adapter over a connection handle
    pub fn new(config: AdapterConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// The repository configuration
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Insert a single record.
    pub fn insert(
        &self,
        schema: &SchemaDescriptor,
        fields: &FieldList,
        opts: &WriteOptions,
    ) -> Result<WriteOutcome> {
        let return_new = opts.needs_return_new();
        let query = build_options(&[
            (return_new, "returnNew"),
            (opts.on_conflict.overwrites(), "overwrite"),
        ]);
        let doc = codec::encode(fields, schema)?;

        provision::ensure_exists(&self.config, schema, &self.transport)?;

        let path = format!("/_api/document/{}{}", schema.source, query);
        debug!("[WRITE] insert into '{}'", schema.source);
        let result = self.transport.post(&path, &Value::Object(doc));

        let interpreted = interpret(result, return_new, &opts.on_conflict)?;
        Ok(self.single_outcome(interpreted, opts))
    }

    /// Insert a batch of records in one request.
    ///
    /// The batch is all-or-nothing: any transport-level failure reports an
    /// invalid outcome carrying the status code, with no per-row modeling.
    pub fn insert_many(
        &self,
        schema: &SchemaDescriptor,
        entries: &[FieldList],
        opts: &WriteOptions,
    ) -> Result<WriteOutcome> {
        let return_new = opts.needs_return_new();
        let query = build_options(&[
            (return_new, "returnNew"),
            (opts.on_conflict.overwrites(), "overwrite"),
        ]);

        let mut docs = Vec::with_capacity(entries.len());
        for fields in entries {
            docs.push(Value::Object(codec::encode(fields, schema)?));
        }

        provision::ensure_exists(&self.config, schema, &self.transport)?;

        let path = format!("/_api/document/{}{}", schema.source, query);
        debug!(
            "[WRITE] insert {} document(s) into '{}'",
            docs.len(),
            schema.source
        );
        match self.transport.post(&path, &Value::Array(docs)) {
            Ok(response) => {
                let written = response
                    .body
                    .as_array()
                    .map(|items| items.len())
                    .unwrap_or(entries.len());
                let rows = if opts.return_fields.is_empty() {
                    None
                } else {
                    let items = response.body.as_array().cloned().unwrap_or_default();
                    Some(
                        items
                            .iter()
                            .map(|item| match codec::decode(item, return_new) {
                                Some(doc) => project(&doc, &opts.return_fields),
                                None => vec![Value::Null; opts.return_fields.len()],
                            })
                            .collect(),
                    )
                };
                Ok(WriteOutcome::Ok {
                    affected: written,
                    rows,
                })
            }
            Err(err) => {
                debug!(
                    "[WRITE] batch insert into '{}' failed: {}",
                    schema.source, err.message
                );
                Ok(WriteOutcome::Invalid(vec![Violation::Status(
                    err.status.unwrap_or(0),
                )]))
            }
        }
    }

    /// Partially update a single record by primary key.
    ///
    /// The primary key must be the first filter; trailing filters are ignored
    /// for legacy callers. Updates never rewrite edge endpoints.
    pub fn update(
        &self,
        schema: &SchemaDescriptor,
        fields: &FieldList,
        filters: &[Filter],
        opts: &WriteOptions,
    ) -> Result<WriteOutcome> {
        let key = primary_key_for_update(filters, &schema.primary_key)?;
        let return_new = opts.needs_return_new();
        let query = build_options(&[(return_new, "returnNew")]);
        let doc = codec::encode_flat(fields);

        provision::ensure_exists(&self.config, schema, &self.transport)?;

        let path = format!("/_api/document/{}/{}{}", schema.source, key, query);
        debug!("[WRITE] update '{}/{}'", schema.source, key);
        let result = self.transport.patch(&path, &Value::Object(doc));

        let interpreted = interpret(result, return_new, &opts.on_conflict)?;
        Ok(self.single_outcome(interpreted, opts))
    }

    /// Delete a single record by primary key.
    ///
    /// Requires exactly one filter, on the primary key; filtered bulk delete
    /// is out of scope.
    pub fn delete(&self, schema: &SchemaDescriptor, filters: &[Filter]) -> Result<WriteOutcome> {
        let key = primary_key_for_delete(filters, &schema.primary_key)?;

        let path = format!("/_api/document/{}/{}", schema.source, key);
        debug!("[WRITE] delete '{}/{}'", schema.source, key);
        match self.transport.delete(&path) {
            Ok(_) => Ok(WriteOutcome::Ok {
                affected: 1,
                rows: None,
            }),
            Err(err) if err.status == Some(404) => Ok(WriteOutcome::Stale),
            Err(err) => Err(err.into_fatal()),
        }
    }

    fn single_outcome(&self, interpreted: Interpreted, opts: &WriteOptions) -> WriteOutcome {
        match interpreted {
            Interpreted::Success(Some(doc)) => {
                let rows = if opts.return_fields.is_empty() {
                    None
                } else {
                    Some(vec![project(&doc, &opts.return_fields)])
                };
                WriteOutcome::Ok { affected: 1, rows }
            }
            Interpreted::Success(None) => WriteOutcome::empty(),
            Interpreted::Invalid(violations) => WriteOutcome::Invalid(violations),
            Interpreted::Stale => WriteOutcome::Stale,
        }
    }
}

/// Look up the requested fields by string key; absent fields project to null
fn project(doc: &Document, fields: &[String]) -> Vec<Value> {
    fields
        .iter()
        .map(|f| doc.get(f).cloned().unwrap_or(Value::Null))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_missing_fields_are_null() {
        let mut doc = Document::new();
        doc.insert("a".to_string(), json!(1));
        let row = project(&doc, &["a".to_string(), "b".to_string()]);
        assert_eq!(row, vec![json!(1), Value::Null]);
    }
}
