//! Shared pieces of the arango CLI binary.

pub mod error;

pub use error::{CLIError, Result};
