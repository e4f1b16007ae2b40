//! Migration discovery and loading.
//!
//! The filesystem collaborator is an explicit, injectable trait: discovery
//! returns a value (no hidden globals), and tests substitute their own
//! sources.

use super::script::ScriptMigration;
use super::Migration;
use crate::error::{ArangoLinkError, Result};
use log::warn;
use std::fs;
use std::path::PathBuf;

/// One discovered migration: the leading timestamp and the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Leading timestamp parsed from the file name
    pub version: i64,

    /// Full file name (`<timestamp>_<description>.json`)
    pub name: String,
}

/// Source of migration modules.
pub trait MigrationSource {
    /// List available migrations, in no particular order
    fn discover(&self) -> Result<Vec<MigrationFile>>;

    /// Load one migration module
    fn load(&self, file: &MigrationFile) -> Result<Box<dyn Migration>>;
}

impl<S: MigrationSource + ?Sized> MigrationSource for &S {
    fn discover(&self) -> Result<Vec<MigrationFile>> {
        (**self).discover()
    }

    fn load(&self, file: &MigrationFile) -> Result<Box<dyn Migration>> {
        (**self).load(file)
    }
}

/// Scans a directory for `<timestamp>_<description>.json` migration modules.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Source over a migrations directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Parse the leading timestamp of `<timestamp>_<description>`
fn parse_version(name: &str) -> Option<i64> {
    let (prefix, rest) = name.split_once('_')?;
    if rest.is_empty() {
        return None;
    }
    prefix.parse().ok()
}

impl MigrationSource for DirectorySource {
    fn discover(&self) -> Result<Vec<MigrationFile>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            ArangoLinkError::Migration(format!(
                "cannot list migrations directory '{}': {}",
                self.dir.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                ArangoLinkError::Migration(format!("cannot read directory entry: {}", e))
            })?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            match parse_version(&name) {
                Some(version) => files.push(MigrationFile { version, name }),
                None => {
                    warn!("[MIGRATE] Skipping '{}': no leading timestamp", name);
                }
            }
        }
        Ok(files)
    }

    fn load(&self, file: &MigrationFile) -> Result<Box<dyn Migration>> {
        let path = self.dir.join(&file.name);
        let raw = fs::read_to_string(&path).map_err(|e| {
            ArangoLinkError::Migration(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let script: ScriptMigration = serde_json::from_str(&raw).map_err(|e| {
            ArangoLinkError::Migration(format!("invalid migration module '{}': {}", file.name, e))
        })?;
        Ok(Box::new(script))
    }
}
