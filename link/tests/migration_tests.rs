//! Integration tests for the migration runner.

mod common;

use arango_link::migration::{
    DirectorySource, JsonFileLedger, Ledger, MemoryLedger, MigrationFile, MigrationSource,
    Migrator,
};
use arango_link::{ArangoLinkError, Migration, MigrationOutcome, MigrationStatus, Transport};
use common::{ok_empty, MockTransport};
use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Migration stub that returns scripted signals.
struct StubMigration {
    up: MigrationStatus,
    down: MigrationStatus,
}

impl Migration for StubMigration {
    fn up(&self, _transport: &dyn Transport) -> MigrationStatus {
        self.up.clone()
    }

    fn down(&self, _transport: &dyn Transport) -> MigrationStatus {
        self.down.clone()
    }
}

/// Source with fixed files and scripted per-version behavior.
#[derive(Default)]
struct StubSource {
    files: Vec<MigrationFile>,
    behavior: HashMap<i64, (MigrationStatus, MigrationStatus)>,
    loads: AtomicUsize,
}

impl StubSource {
    fn new() -> Self {
        Self::default()
    }

    fn with(mut self, version: i64, name: &str, up: MigrationStatus, down: MigrationStatus) -> Self {
        self.files.push(MigrationFile {
            version,
            name: name.to_string(),
        });
        self.behavior.insert(version, (up, down));
        self
    }

    fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl MigrationSource for StubSource {
    fn discover(&self) -> arango_link::Result<Vec<MigrationFile>> {
        Ok(self.files.clone())
    }

    fn load(&self, file: &MigrationFile) -> arango_link::Result<Box<dyn Migration>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let (up, down) = self.behavior.get(&file.version).cloned().ok_or_else(|| {
            ArangoLinkError::Migration(format!("no migration for version {}", file.version))
        })?;
        Ok(Box::new(StubMigration { up, down }))
    }
}

fn applied() -> MigrationStatus {
    MigrationStatus::Applied
}

#[test]
fn test_up_applies_pending_in_ascending_order() {
    // discovered out of order on purpose
    let source = StubSource::new()
        .with(2, "2_add_index.json", applied(), applied())
        .with(1, "1_create_users.json", applied(), applied());
    let ledger = MemoryLedger::new();
    let migrator = Migrator::new(source, &ledger, MockTransport::new());

    let reports = migrator.up("mydb").unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].version, 1);
    assert_eq!(reports[0].outcome, MigrationOutcome::Applied);
    assert_eq!(reports[1].version, 2);
    assert_eq!(reports[1].outcome, MigrationOutcome::Applied);
    assert_eq!(ledger.versions("mydb").unwrap(), vec![1, 2]);
}

#[test]
fn test_up_skips_already_applied_versions() {
    let source = StubSource::new()
        .with(1, "1_create_users.json", applied(), applied())
        .with(2, "2_add_index.json", applied(), applied());
    let ledger = MemoryLedger::with_versions("mydb", [1]);
    let migrator = Migrator::new(source, &ledger, MockTransport::new());

    let reports = migrator.up("mydb").unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].version, 2);
    assert_eq!(ledger.versions("mydb").unwrap(), vec![1, 2]);
}

#[test]
fn test_up_with_nothing_pending_is_a_clean_noop() {
    let source = StubSource::new().with(1, "1_create_users.json", applied(), applied());
    let ledger = MemoryLedger::with_versions("mydb", [1]);
    let migrator = Migrator::new(source, &ledger, MockTransport::new());

    assert!(migrator.up("mydb").unwrap().is_empty());
}

#[test]
fn test_up_continues_past_failed_migration() {
    let source = StubSource::new()
        .with(
            1,
            "1_create_users.json",
            MigrationStatus::Failed("collection exists with different type".into()),
            applied(),
        )
        .with(2, "2_add_index.json", applied(), applied());
    let ledger = MemoryLedger::new();
    let migrator = Migrator::new(source, &ledger, MockTransport::new());

    let reports = migrator.up("mydb").unwrap();
    assert_eq!(reports.len(), 2);
    assert!(matches!(reports[0].outcome, MigrationOutcome::Failed(_)));
    assert_eq!(reports[1].outcome, MigrationOutcome::Applied);
    // only the successful migration reaches the ledger
    assert_eq!(ledger.versions("mydb").unwrap(), vec![2]);
}

#[test]
fn test_up_reports_no_action_as_logic_error() {
    let source = StubSource::new().with(
        1,
        "1_noop.json",
        MigrationStatus::NoAction,
        MigrationStatus::NoAction,
    );
    let ledger = MemoryLedger::new();
    let migrator = Migrator::new(source, &ledger, MockTransport::new());

    let reports = migrator.up("mydb").unwrap();
    assert_eq!(reports[0].outcome, MigrationOutcome::NoAction);
    assert!(ledger.versions("mydb").unwrap().is_empty());
}

#[test]
fn test_down_rolls_back_only_newest_version() {
    let source = StubSource::new()
        .with(1, "1_create_users.json", applied(), applied())
        .with(2, "2_add_index.json", applied(), applied());
    let ledger = MemoryLedger::with_versions("mydb", [1, 2]);
    let migrator = Migrator::new(source, &ledger, MockTransport::new());

    let report = migrator.down("mydb").unwrap();
    assert_eq!(report.version, 2);
    assert_eq!(report.outcome, MigrationOutcome::RolledBack);
    assert_eq!(ledger.versions("mydb").unwrap(), vec![1]);
}

#[test]
fn test_down_failure_leaves_ledger_unchanged() {
    let source = StubSource::new().with(
        2,
        "2_add_index.json",
        applied(),
        MigrationStatus::Failed("index in use".into()),
    );
    let ledger = MemoryLedger::with_versions("mydb", [2]);
    let migrator = Migrator::new(source, &ledger, MockTransport::new());

    let report = migrator.down("mydb").unwrap();
    assert!(matches!(report.outcome, MigrationOutcome::Failed(_)));
    assert_eq!(ledger.versions("mydb").unwrap(), vec![2]);
}

#[test]
fn test_down_on_empty_ledger_fails_before_any_load() {
    let source = StubSource::new().with(1, "1_create_users.json", applied(), applied());
    let ledger = MemoryLedger::new();
    let migrator = Migrator::new(&source, &ledger, MockTransport::new());

    let err = migrator.down("mydb").unwrap_err();
    assert!(matches!(err, ArangoLinkError::Migration(_)));
    assert_eq!(source.load_count(), 0);
}

#[test]
fn test_uninitialized_file_ledger_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let source = StubSource::new().with(1, "1_create_users.json", applied(), applied());
    let ledger = JsonFileLedger::new(dir.path().join("missing.json"));
    let migrator = Migrator::new(source, ledger, MockTransport::new());

    assert!(matches!(
        migrator.up("mydb").unwrap_err(),
        ArangoLinkError::LedgerNotInitialized(_)
    ));
}

#[test]
fn test_script_migrations_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("1_create_users.json"),
        r#"{
            "up": [
                {"action": "create_collection", "name": "users"},
                {"action": "create_index", "collection": "users",
                 "fields": ["email"], "options": {"type": "hash", "unique": true}}
            ],
            "down": [{"action": "drop_collection", "name": "users"}]
        }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("2_create_follows.json"),
        r#"{
            "up": [{"action": "create_collection", "name": "follows", "edge": true}],
            "down": [{"action": "drop_collection", "name": "follows"}]
        }"#,
    )
    .unwrap();

    let ledger = JsonFileLedger::new(dir.path().join(".ledger.json"));
    ledger.init().unwrap();

    let transport = MockTransport::new()
        .expect(ok_empty()) // create users
        .expect(ok_empty()) // create index
        .expect(ok_empty()); // create follows
    let migrator = Migrator::new(DirectorySource::new(dir.path()), &ledger, &transport);

    let reports = migrator.up("mydb").unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports
        .iter()
        .all(|r| r.outcome == MigrationOutcome::Applied));
    assert_eq!(ledger.versions("mydb").unwrap(), vec![1, 2]);

    let calls = transport.calls();
    assert_eq!(calls[0].path, "/_api/collection");
    assert_eq!(
        calls[2].body.as_ref().unwrap().get("type"),
        Some(&serde_json::json!(3))
    );

    // roll back the newest migration only
    let transport = MockTransport::new().expect(ok_empty()); // drop follows
    let migrator = Migrator::new(DirectorySource::new(dir.path()), &ledger, &transport);
    let report = migrator.down("mydb").unwrap();
    assert_eq!(report.version, 2);
    assert_eq!(ledger.versions("mydb").unwrap(), vec![1]);
    assert_eq!(transport.calls()[0].method, "DELETE");
    assert_eq!(transport.calls()[0].path, "/_api/collection/follows");
}
