use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Arango CLI - migration tool for arango-link repositories
#[derive(Parser, Debug)]
#[command(name = "arango")]
#[command(version)]
#[command(about = "Schema migration runner for ArangoDB-compatible stores", long_about = None)]
pub struct Cli {
    /// Server URL (e.g. http://localhost:8529)
    #[arg(short = 'u', long = "url", default_value = "http://localhost:8529")]
    pub url: String,

    /// Database name
    #[arg(long = "database", default_value = "_system")]
    pub database: String,

    /// HTTP Basic Auth username
    #[arg(long = "username")]
    pub username: Option<String>,

    /// HTTP Basic Auth password
    #[arg(long = "password")]
    pub password: Option<String>,

    /// Bearer authentication token
    #[arg(long = "token")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply or roll back schema migrations
    Migrate(MigrateArgs),
}

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Migration direction (`rollback` is an alias for `down`)
    #[arg(short = 'd', long = "direction", value_enum, default_value = "up")]
    pub direction: Direction,

    /// Migrations directory
    #[arg(long = "dir", default_value = "migrations")]
    pub dir: PathBuf,

    /// Applied-versions ledger file
    #[arg(long = "ledger", default_value = "migrations/.ledger.json")]
    pub ledger: PathBuf,

    /// Create the ledger file if it does not exist yet
    #[arg(long = "init")]
    pub init: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply all pending migrations
    Up,
    /// Roll back the most recently applied migration
    Down,
    /// Alias for down
    Rollback,
}

impl Cli {
    /// Database-rooted base URL for the transport
    pub fn base_url(&self) -> String {
        format!("{}/_db/{}", self.url.trim_end_matches('/'), self.database)
    }
}
