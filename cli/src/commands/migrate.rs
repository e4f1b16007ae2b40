//! The migrate command: apply or roll back schema migrations.

use crate::args::{Cli, Direction, MigrateArgs};
use arango_cli::{CLIError, Result};
use arango_link::migration::{DirectorySource, JsonFileLedger, Migrator};
use arango_link::{AuthProvider, HttpTransport, MigrationOutcome, MigrationReport};
use log::info;

pub fn run(cli: &Cli, args: &MigrateArgs) -> Result<()> {
    info!(
        "[CLI_MIGRATE] database={} dir={} direction={:?}",
        cli.database,
        args.dir.display(),
        args.direction
    );
    let auth = match (&cli.token, &cli.username) {
        (Some(token), _) => AuthProvider::bearer_token(token.clone()),
        (None, Some(username)) => AuthProvider::basic_auth(
            username.clone(),
            cli.password.clone().unwrap_or_default(),
        ),
        (None, None) => AuthProvider::none(),
    };
    let transport = HttpTransport::builder()
        .base_url(cli.base_url())
        .auth(auth)
        .build()?;

    let ledger = JsonFileLedger::new(&args.ledger);
    if args.init {
        ledger.init()?;
    }

    let migrator = Migrator::new(DirectorySource::new(&args.dir), ledger, transport);
    match args.direction {
        Direction::Up => {
            let reports = migrator.up(&cli.database)?;
            if reports.is_empty() {
                println!("Nothing to migrate.");
                return Ok(());
            }
            let mut failures = Vec::new();
            for report in &reports {
                print_report(report);
                if !matches!(report.outcome, MigrationOutcome::Applied) {
                    failures.push(report.name.clone());
                }
            }
            if failures.is_empty() {
                Ok(())
            } else {
                Err(CLIError::MigrationFailed(failures.join(", ")))
            }
        }
        Direction::Down | Direction::Rollback => {
            let report = migrator.down(&cli.database)?;
            print_report(&report);
            match report.outcome {
                MigrationOutcome::RolledBack => Ok(()),
                _ => Err(CLIError::MigrationFailed(report.name)),
            }
        }
    }
}

fn print_report(report: &MigrationReport) {
    match &report.outcome {
        MigrationOutcome::Applied => println!("  applied     {}", report.name),
        MigrationOutcome::RolledBack => println!("  rolled back {}", report.name),
        MigrationOutcome::Failed(reason) => println!("  FAILED      {} ({})", report.name, reason),
        MigrationOutcome::NoAction => {
            println!("  NO ACTION   {} (up/down took no action)", report.name)
        }
    }
}
