//! Lazy schema provisioning.
//!
//! A write against a missing collection creates the collection and its
//! declared indexes on the fly, unless the repository is configured static.
//! The existence-check-then-create sequence is not atomic; a concurrent
//! writer winning the race surfaces as a duplicate-name error from the
//! create step, which is treated as success.

use crate::error::{ArangoLinkError, Result};
use crate::interpret::ERR_DUPLICATE_NAME;
use crate::models::{AdapterConfig, IndexDescriptor, SchemaDescriptor};
use crate::transport::Transport;
use log::{debug, info};
use serde_json::{json, Value};

/// Ensure the schema's collection exists, creating it and its declared
/// indexes when missing.
///
/// Static-mode repositories fail instead of creating; the operator is told to
/// run migrations. Index descriptors are validated before any network call.
pub fn ensure_exists(
    config: &AdapterConfig,
    schema: &SchemaDescriptor,
    transport: &dyn Transport,
) -> Result<()> {
    validate_indexes(&schema.indexes)?;

    match transport.get(&format!("/_api/collection/{}", schema.source)) {
        Ok(_) => {
            debug!("[PROVISION] Collection '{}' exists", schema.source);
            return Ok(());
        }
        Err(err) if err.status == Some(404) => {}
        Err(err) => return Err(err.into_fatal()),
    }

    if config.static_schema {
        return Err(ArangoLinkError::Configuration(format!(
            "collection '{}' does not exist and the repository is static; \
             run migrations to create it",
            schema.source
        )));
    }

    create_collection(schema, transport)?;
    for index in &schema.indexes {
        create_index(&schema.source, index, transport)?;
    }
    Ok(())
}

fn validate_indexes(indexes: &[IndexDescriptor]) -> Result<()> {
    for index in indexes {
        if index.fields.is_empty() {
            return Err(ArangoLinkError::Configuration(
                "index descriptor declares no fields".into(),
            ));
        }
    }
    Ok(())
}

fn create_collection(schema: &SchemaDescriptor, transport: &dyn Transport) -> Result<()> {
    let mut body = json!({
        "name": schema.source,
        "type": schema.kind.type_code(),
    });
    if let Value::Object(map) = &mut body {
        for (key, value) in &schema.options {
            map.insert(key.clone(), value.clone());
        }
    }

    info!("[PROVISION] Creating collection '{}'", schema.source);
    match transport.post("/_api/collection", &body) {
        Ok(_) => Ok(()),
        Err(err) if err.error_num == Some(ERR_DUPLICATE_NAME) => {
            // Lost the creation race to a concurrent writer
            debug!(
                "[PROVISION] Collection '{}' created concurrently",
                schema.source
            );
            Ok(())
        }
        Err(err) => Err(err.into_fatal()),
    }
}

fn create_index(
    collection: &str,
    index: &IndexDescriptor,
    transport: &dyn Transport,
) -> Result<()> {
    let mut body = json!({ "fields": index.fields });
    if let Value::Object(map) = &mut body {
        for (key, value) in &index.options {
            map.insert(key.clone(), value.clone());
        }
    }

    info!(
        "[PROVISION] Creating index on '{}' over {:?}",
        collection, index.fields
    );
    match transport.post(&format!("/_api/index?collection={}", collection), &body) {
        Ok(_) => Ok(()),
        Err(err) if err.error_num == Some(ERR_DUPLICATE_NAME) => Ok(()),
        Err(err) => Err(err.into_fatal()),
    }
}
