//! Applied-versions ledger.
//!
//! The ledger records, per database name, which migration timestamps have
//! been applied. Storage is behind a trait; the file-backed implementation
//! keeps one JSON object mapping database names to sorted version lists.

use crate::error::{ArangoLinkError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Persisted set of applied migration versions, keyed by database name.
pub trait Ledger {
    /// Applied versions for `db`, ascending
    fn versions(&self, db: &str) -> Result<Vec<i64>>;

    /// Record `version` as applied to `db`
    fn append(&self, version: i64, db: &str) -> Result<()>;

    /// Remove `version` from `db`'s applied set
    fn remove(&self, version: i64, db: &str) -> Result<()>;
}

impl<L: Ledger + ?Sized> Ledger for &L {
    fn versions(&self, db: &str) -> Result<Vec<i64>> {
        (**self).versions(db)
    }

    fn append(&self, version: i64, db: &str) -> Result<()> {
        (**self).append(version, db)
    }

    fn remove(&self, version: i64, db: &str) -> Result<()> {
        (**self).remove(version, db)
    }
}

/// File-backed ledger: one JSON object `{"<db>": [versions...]}`.
///
/// The file must exist before use; [`JsonFileLedger::init`] creates an empty
/// one. Reading an absent file is a ledger-not-initialized error so that a
/// missing setup step is surfaced instead of silently treated as "nothing
/// applied".
pub struct JsonFileLedger {
    path: PathBuf,
}

impl JsonFileLedger {
    /// Ledger over a JSON file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create an empty ledger file if none exists
    pub fn init(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, "{}")?;
        Ok(())
    }

    fn read(&self) -> Result<BTreeMap<String, Vec<i64>>> {
        if !self.path.exists() {
            return Err(ArangoLinkError::LedgerNotInitialized(format!(
                "ledger file '{}' does not exist",
                self.path.display()
            )));
        }
        let raw = fs::read_to_string(&self.path)?;
        let map = serde_json::from_str(&raw).map_err(|e| {
            ArangoLinkError::Migration(format!(
                "corrupt ledger file '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(map)
    }

    fn write(&self, map: &BTreeMap<String, Vec<i64>>) -> Result<()> {
        let raw = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Ledger for JsonFileLedger {
    fn versions(&self, db: &str) -> Result<Vec<i64>> {
        let map = self.read()?;
        Ok(map.get(db).cloned().unwrap_or_default())
    }

    fn append(&self, version: i64, db: &str) -> Result<()> {
        let mut map = self.read()?;
        let versions = map.entry(db.to_string()).or_default();
        if !versions.contains(&version) {
            versions.push(version);
            versions.sort_unstable();
        }
        self.write(&map)
    }

    fn remove(&self, version: i64, db: &str) -> Result<()> {
        let mut map = self.read()?;
        if let Some(versions) = map.get_mut(db) {
            versions.retain(|v| *v != version);
        }
        self.write(&map)
    }
}

/// In-memory ledger for tests and embedded use.
#[derive(Default)]
pub struct MemoryLedger {
    inner: Mutex<BTreeMap<String, BTreeSet<i64>>>,
}

impl MemoryLedger {
    /// Empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger pre-seeded with applied versions for one database
    pub fn with_versions(db: &str, versions: impl IntoIterator<Item = i64>) -> Self {
        let ledger = Self::new();
        let mut inner = ledger.inner.lock().expect("ledger lock");
        inner.insert(db.to_string(), versions.into_iter().collect());
        drop(inner);
        ledger
    }
}

impl Ledger for MemoryLedger {
    fn versions(&self, db: &str) -> Result<Vec<i64>> {
        let inner = self.inner.lock().expect("ledger lock");
        Ok(inner
            .get(db)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default())
    }

    fn append(&self, version: i64, db: &str) -> Result<()> {
        let mut inner = self.inner.lock().expect("ledger lock");
        inner.entry(db.to_string()).or_default().insert(version);
        Ok(())
    }

    fn remove(&self, version: i64, db: &str) -> Result<()> {
        let mut inner = self.inner.lock().expect("ledger lock");
        if let Some(set) = inner.get_mut(db) {
            set.remove(&version);
        }
        Ok(())
    }
}
