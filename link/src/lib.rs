//! # arango-link: write-path adapter for ArangoDB-compatible document stores
//!
//! Translates abstract insert / update / delete / insert-many operations into
//! HTTP requests against a document/graph store, and decodes the store's
//! heterogeneous responses back into a normalized result taxonomy.
//!
//! ## Features
//!
//! - **Write adapter**: insert, insert-many, update and delete with conflict
//!   policies, return-field projection and single-primary-key filters
//! - **Edge schemas**: graph edges get their endpoint references qualified to
//!   `collection/key` identifiers automatically
//! - **Lazy provisioning**: missing collections and their declared indexes
//!   are created on first write (unless the repository is static)
//! - **Migration runner**: ordered, timestamped schema changes with a
//!   persisted applied-versions ledger
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use arango_link::models::{SchemaDescriptor, WriteOptions};
//! use arango_link::{AdapterConfig, AuthProvider, HttpTransport, WriteAdapter};
//! use serde_json::json;
//!
//! fn main() -> arango_link::Result<()> {
//!     let transport = HttpTransport::builder()
//!         .base_url("http://localhost:8529/_db/mydb")
//!         .auth(AuthProvider::basic_auth("root".into(), "secret".into()))
//!         .build()?;
//!     let adapter = WriteAdapter::new(AdapterConfig::new(), transport);
//!
//!     let schema = SchemaDescriptor::document("users");
//!     let fields = vec![("email".to_string(), json!("alice@example.com"))];
//!     let outcome = adapter.insert(&schema, &fields, &WriteOptions::new())?;
//!     println!("outcome: {:?}", outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Migrations
//!
//! ```rust,no_run
//! use arango_link::migration::{DirectorySource, JsonFileLedger, Migrator};
//! use arango_link::HttpTransport;
//!
//! # fn example() -> arango_link::Result<()> {
//! let transport = HttpTransport::builder()
//!     .base_url("http://localhost:8529/_db/mydb")
//!     .build()?;
//! let ledger = JsonFileLedger::new("migrations/.ledger.json");
//! ledger.init()?;
//!
//! let migrator = Migrator::new(DirectorySource::new("migrations"), ledger, transport);
//! for report in migrator.up("mydb")? {
//!     println!("{} -> {:?}", report.name, report.outcome);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod adapter;
pub mod auth;
pub mod codec;
pub mod error;
pub mod interpret;
pub mod migration;
pub mod models;
pub mod options;
pub mod provision;
pub mod transport;

// Re-export main types for convenience
pub use adapter::WriteAdapter;
pub use auth::AuthProvider;
pub use error::{ArangoLinkError, Result};
pub use interpret::{interpret, Interpreted};
pub use migration::{Migration, MigrationOutcome, MigrationReport, MigrationStatus, Migrator};
pub use models::{
    AdapterConfig, ConflictPolicy, Document, FieldList, Filter, IndexDescriptor, SchemaDescriptor,
    SchemaKind, Violation, WriteOptions, WriteOutcome,
};
pub use transport::{ApiError, ApiResponse, HttpTransport, Transport, TransportResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
