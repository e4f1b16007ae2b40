//! Declarative migration modules.
//!
//! A migration file is a JSON module declaring `up` and `down` action lists.
//! Schema-change actions are idempotent where the store allows it: creating
//! something that already exists, or dropping something already gone, counts
//! as success so a half-applied migration can be re-run safely.
//!
//! ```json
//! {
//!   "up": [
//!     {"action": "create_collection", "name": "users"},
//!     {"action": "create_index", "collection": "users",
//!      "fields": ["email"], "options": {"type": "hash", "unique": true}}
//!   ],
//!   "down": [
//!     {"action": "drop_collection", "name": "users"}
//!   ]
//! }
//! ```

use super::{Migration, MigrationStatus};
use crate::interpret::ERR_DUPLICATE_NAME;
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One declarative schema-change step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MigrationAction {
    /// Create a collection (`edge: true` for edge collections)
    CreateCollection {
        /// Collection name
        name: String,
        /// Edge collection when true
        #[serde(default)]
        edge: bool,
        /// Extra creation options passed through to the server
        #[serde(default)]
        options: Map<String, Value>,
    },

    /// Create an index on a collection
    CreateIndex {
        /// Target collection
        collection: String,
        /// Indexed fields
        fields: Vec<String>,
        /// Index creation options
        #[serde(default)]
        options: Map<String, Value>,
    },

    /// Drop a collection
    DropCollection {
        /// Collection name
        name: String,
    },

    /// Raw escape hatch: issue one request as-is
    Execute {
        /// HTTP method (`GET`, `POST`, `PATCH`, `DELETE`, `HEAD`)
        method: String,
        /// Request path
        path: String,
        /// JSON body for `POST`/`PATCH`
        #[serde(default)]
        body: Value,
    },
}

impl MigrationAction {
    fn execute(&self, transport: &dyn Transport) -> std::result::Result<(), String> {
        match self {
            MigrationAction::CreateCollection {
                name,
                edge,
                options,
            } => {
                let mut body = Map::new();
                body.insert("name".to_string(), Value::String(name.clone()));
                body.insert("type".to_string(), Value::from(if *edge { 3 } else { 2 }));
                for (key, value) in options {
                    body.insert(key.clone(), value.clone());
                }
                match transport.post("/_api/collection", &Value::Object(body)) {
                    Ok(_) => Ok(()),
                    Err(err) if err.error_num == Some(ERR_DUPLICATE_NAME) => Ok(()),
                    Err(err) => Err(err.message),
                }
            }
            MigrationAction::CreateIndex {
                collection,
                fields,
                options,
            } => {
                let mut body = Map::new();
                body.insert(
                    "fields".to_string(),
                    Value::Array(fields.iter().cloned().map(Value::String).collect()),
                );
                for (key, value) in options {
                    body.insert(key.clone(), value.clone());
                }
                let path = format!("/_api/index?collection={}", collection);
                match transport.post(&path, &Value::Object(body)) {
                    Ok(_) => Ok(()),
                    Err(err) if err.error_num == Some(ERR_DUPLICATE_NAME) => Ok(()),
                    Err(err) => Err(err.message),
                }
            }
            MigrationAction::DropCollection { name } => {
                match transport.delete(&format!("/_api/collection/{}", name)) {
                    Ok(_) => Ok(()),
                    Err(err) if err.status == Some(404) => Ok(()),
                    Err(err) => Err(err.message),
                }
            }
            MigrationAction::Execute { method, path, body } => {
                let result = match method.to_ascii_uppercase().as_str() {
                    "GET" => transport.get(path),
                    "HEAD" => transport.head(path),
                    "POST" => transport.post(path, body),
                    "PATCH" => transport.patch(path, body),
                    "DELETE" => transport.delete(path),
                    other => return Err(format!("unsupported method '{}'", other)),
                };
                result.map(|_| ()).map_err(|err| err.message)
            }
        }
    }
}

/// A migration module decoded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptMigration {
    /// Apply actions, run in order
    #[serde(default)]
    pub up: Vec<MigrationAction>,

    /// Rollback actions, run in order
    #[serde(default)]
    pub down: Vec<MigrationAction>,
}

fn run_actions(actions: &[MigrationAction], transport: &dyn Transport) -> MigrationStatus {
    if actions.is_empty() {
        return MigrationStatus::NoAction;
    }
    for action in actions {
        if let Err(reason) = action.execute(transport) {
            return MigrationStatus::Failed(reason);
        }
    }
    MigrationStatus::Applied
}

impl Migration for ScriptMigration {
    fn up(&self, transport: &dyn Transport) -> MigrationStatus {
        run_actions(&self.up, transport)
    }

    fn down(&self, transport: &dyn Transport) -> MigrationStatus {
        run_actions(&self.down, transport)
    }
}
