//! Store seam used by the schema loader and the generation engine.

mod sqlite;

pub use sqlite::{SqliteStore, SqliteUnit};

use async_trait::async_trait;
use thiserror::Error;

use fitgen_core::NewRow;

/// Errors raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("row rejected: {0}")]
    Rejected(String),
    #[error("domain violation: {0}")]
    Domain(#[from] fitgen_core::Error),
}

/// An open atomic unit. Writes become visible only after `commit`.
///
/// Dropping a unit without committing discards its writes.
#[async_trait]
pub trait StoreUnit: Send + Sized {
    /// Insert a row and return the identifier the store assigned to it.
    async fn insert(&mut self, row: &NewRow) -> Result<i64, StoreError>;
    async fn commit(self) -> Result<(), StoreError>;
    async fn rollback(self) -> Result<(), StoreError>;
}

/// A relational store able to open atomic units.
#[async_trait]
pub trait Store: Send + Sync {
    type Unit: StoreUnit;

    /// Execute one schema statement outside any unit.
    async fn execute_statement(&self, statement: &str) -> Result<(), StoreError>;
    async fn begin(&self) -> Result<Self::Unit, StoreError>;
    /// Committed user identifiers in insertion order.
    async fn user_ids(&self) -> Result<Vec<i64>, StoreError>;
}
