use crate::error::{ArangoLinkError, Result};
use serde_json::{Map, Value};

/// A declared index: the indexed fields plus creation options
/// (e.g. `{"type": "hash", "unique": true}`).
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDescriptor {
    /// Fields covered by the index, in declaration order
    pub fields: Vec<String>,

    /// Index creation options passed through to the server
    pub options: Map<String, Value>,
}

impl IndexDescriptor {
    /// Create a descriptor with no extra options
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            options: Map::new(),
        }
    }

    /// Attach creation options
    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = options;
        self
    }

    /// Parse one raw descriptor.
    ///
    /// Accepted shape: a `[field_list, options]` pair where `field_list` is an
    /// array of strings and `options` is an object (the options element may be
    /// omitted). Anything else is a configuration error, raised before any
    /// network call is made.
    pub fn from_value(value: &Value) -> Result<Self> {
        let pair = value.as_array().ok_or_else(|| bad_shape(value))?;
        if pair.is_empty() || pair.len() > 2 {
            return Err(bad_shape(value));
        }

        let raw_fields = pair[0].as_array().ok_or_else(|| bad_shape(value))?;
        let mut fields = Vec::with_capacity(raw_fields.len());
        for f in raw_fields {
            match f.as_str() {
                Some(s) => fields.push(s.to_string()),
                None => return Err(bad_shape(value)),
            }
        }
        if fields.is_empty() {
            return Err(bad_shape(value));
        }

        let options = match pair.get(1) {
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err(bad_shape(value)),
            None => Map::new(),
        };

        Ok(Self { fields, options })
    }

    /// Parse a raw index list (array of `[field_list, options]` pairs)
    pub fn parse_list(value: &Value) -> Result<Vec<Self>> {
        let entries = value.as_array().ok_or_else(|| {
            ArangoLinkError::Configuration(format!(
                "index declarations must be a list of [fields, options] pairs, got: {}",
                value
            ))
        })?;
        entries.iter().map(Self::from_value).collect()
    }
}

fn bad_shape(value: &Value) -> ArangoLinkError {
    ArangoLinkError::Configuration(format!(
        "invalid index descriptor {}: expected [fields, options] with a non-empty string field list",
        value
    ))
}
