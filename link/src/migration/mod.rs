//! Migration runner: ordered, timestamped schema changes with a persisted
//! applied-versions ledger.
//!
//! The ledger is the sole source of truth for "has this migration run";
//! migration files are immutable. `up` applies every pending migration in
//! ascending timestamp order and keeps going past per-file failures; `down`
//! rolls back only the most recently applied version. Concurrent runs against
//! the same database are not locked out; the operator serializes them.

pub mod ledger;
pub mod script;
pub mod source;

pub use ledger::{JsonFileLedger, Ledger, MemoryLedger};
pub use script::{MigrationAction, ScriptMigration};
pub use source::{DirectorySource, MigrationFile, MigrationSource};

use crate::error::{ArangoLinkError, Result};
use crate::transport::Transport;
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// Signal returned by a migration procedure.
///
/// `NoAction` means the procedure ran but did nothing, which the runner
/// reports as a logic error for that file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationStatus {
    /// Explicit success
    Applied,

    /// Explicit failure with a reason
    Failed(String),

    /// The procedure took no action
    NoAction,
}

/// One schema-change module with an apply and a rollback procedure.
pub trait Migration {
    /// Apply the migration
    fn up(&self, transport: &dyn Transport) -> MigrationStatus;

    /// Roll the migration back
    fn down(&self, transport: &dyn Transport) -> MigrationStatus;
}

/// Per-file outcome of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Applied and recorded in the ledger
    Applied,

    /// Rolled back and removed from the ledger
    RolledBack,

    /// The procedure (or its load) failed; the ledger is untouched
    Failed(String),

    /// The procedure took no action; reported as a logic error
    NoAction,
}

/// Report for one migration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Leading timestamp of the file
    pub version: i64,

    /// File name
    pub name: String,

    /// What happened
    pub outcome: MigrationOutcome,
}

/// The migration runner. Single-process, single-invocation per database name.
pub struct Migrator<S: MigrationSource, L: Ledger, T: Transport> {
    source: S,
    ledger: L,
    transport: T,
}

impl<S: MigrationSource, L: Ledger, T: Transport> Migrator<S, L, T> {
    /// Create a runner over a migration source, a ledger and a connection
    pub fn new(source: S, ledger: L, transport: T) -> Self {
        Self {
            source,
            ledger,
            transport,
        }
    }

    /// Apply all pending migrations for `db`, in ascending timestamp order.
    ///
    /// Returns one report per attempted file; an empty vector means nothing
    /// was pending. Per-file failures do not abort the batch; ledger write
    /// failures do.
    pub fn up(&self, db: &str) -> Result<Vec<MigrationReport>> {
        let applied: BTreeSet<i64> = self.ledger.versions(db)?.into_iter().collect();
        let mut files = self.source.discover()?;
        files.sort_by_key(|f| f.version);

        let pending: Vec<MigrationFile> = files
            .into_iter()
            .filter(|f| !applied.contains(&f.version))
            .collect();
        if pending.is_empty() {
            info!("[MIGRATE] Nothing to migrate for '{}'", db);
            return Ok(Vec::new());
        }

        let mut reports = Vec::with_capacity(pending.len());
        for file in pending {
            debug!("[MIGRATE] Applying {} ({})", file.name, file.version);
            let outcome = match self.source.load(&file) {
                Ok(migration) => match migration.up(&self.transport) {
                    MigrationStatus::Applied => {
                        self.ledger.append(file.version, db)?;
                        info!("[MIGRATE] Applied {}", file.name);
                        MigrationOutcome::Applied
                    }
                    MigrationStatus::Failed(reason) => {
                        warn!("[MIGRATE] {} failed: {}", file.name, reason);
                        MigrationOutcome::Failed(reason)
                    }
                    MigrationStatus::NoAction => {
                        warn!("[MIGRATE] {} took no action", file.name);
                        MigrationOutcome::NoAction
                    }
                },
                Err(err) => {
                    warn!("[MIGRATE] Could not load {}: {}", file.name, err);
                    MigrationOutcome::Failed(err.to_string())
                }
            };
            reports.push(MigrationReport {
                version: file.version,
                name: file.name,
                outcome,
            });
        }
        Ok(reports)
    }

    /// Roll back the single most recently applied migration for `db`.
    ///
    /// Fails fatally, before any file load, when the ledger is empty. On
    /// failure or no-action the ledger is left unchanged.
    pub fn down(&self, db: &str) -> Result<MigrationReport> {
        let versions = self.ledger.versions(db)?;
        let target = versions.iter().max().copied().ok_or_else(|| {
            ArangoLinkError::Migration(format!("no migrations have been applied to '{}'", db))
        })?;

        let files = self.source.discover()?;
        let file = files
            .into_iter()
            .find(|f| f.version == target)
            .ok_or_else(|| {
                ArangoLinkError::Migration(format!(
                    "migration file for applied version {} not found",
                    target
                ))
            })?;

        debug!("[MIGRATE] Rolling back {} ({})", file.name, file.version);
        let outcome = match self.source.load(&file)?.down(&self.transport) {
            MigrationStatus::Applied => {
                self.ledger.remove(file.version, db)?;
                info!("[MIGRATE] Rolled back {}", file.name);
                MigrationOutcome::RolledBack
            }
            MigrationStatus::Failed(reason) => {
                warn!("[MIGRATE] Rollback of {} failed: {}", file.name, reason);
                MigrationOutcome::Failed(reason)
            }
            MigrationStatus::NoAction => {
                warn!("[MIGRATE] Rollback of {} took no action", file.name);
                MigrationOutcome::NoAction
            }
        };
        Ok(MigrationReport {
            version: file.version,
            name: file.name,
            outcome,
        })
    }
}
