// smartstore-core/src/ports/warehouse.rs

// What the loader needs from a relational store. The DuckDB adapter is the
// only implementation; tests plug in an in-memory mock.

use crate::domain::warehouse::SqlValue;
use crate::error::SmartStoreError;
use async_trait::async_trait;

#[async_trait]
pub trait Warehouse: Send + Sync {
    async fn execute(&self, query: &str) -> Result<(), SmartStoreError>;

    /// Runs every statement in one transaction; nothing is kept on failure.
    async fn execute_in_transaction(&self, statements: &[String]) -> Result<(), SmartStoreError>;

    /// Inserts `rows` into `table` in one transaction and returns the number
    /// of rows written.
    async fn insert_rows(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> Result<u64, SmartStoreError>;

    async fn query_scalar(&self, query: &str) -> Result<u64, SmartStoreError>;

    fn engine_name(&self) -> &str;
}
