// smartstore-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::types::Value as DuckValue;
use duckdb::{Config, Connection, params_from_iter};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

// Imports Hexagonaux
use crate::domain::warehouse::SqlValue;
use crate::error::SmartStoreError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::infrastructure::fs::ensure_dir;
use crate::ports::warehouse::Warehouse;

pub struct DuckDBWarehouse {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBWarehouse {
    /// Opens (or creates) the warehouse file. `:memory:` opens a transient
    /// database.
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            if let Some(parent) = Path::new(db_path).parent()
                && !parent.as_os_str().is_empty()
            {
                ensure_dir(parent)?;
            }
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SmartStoreError> {
        self.conn.lock().map_err(|_| {
            SmartStoreError::Infrastructure(InfrastructureError::Database(DatabaseError::Poisoned(
                "DuckDB Mutex Poisoned".into(),
            )))
        })
    }
}

fn to_duck(value: &SqlValue) -> DuckValue {
    match value {
        SqlValue::Null => DuckValue::Null,
        SqlValue::BigInt(i) => DuckValue::BigInt(*i),
        SqlValue::Double(f) => DuckValue::Double(*f),
        SqlValue::Text(s) => DuckValue::Text(s.clone()),
    }
}

fn insert_sql(table: &str, columns: &[&str]) -> String {
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    )
}

#[async_trait]
impl Warehouse for DuckDBWarehouse {
    async fn execute(&self, query: &str) -> Result<(), SmartStoreError> {
        debug!(sql = query, "execute");
        let conn = self.lock()?;
        conn.execute(query, []).map(|_rows| ())?;
        Ok(())
    }

    async fn execute_in_transaction(&self, statements: &[String]) -> Result<(), SmartStoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        for sql in statements {
            debug!(sql = sql.as_str(), "execute (transaction)");
            tx.execute(sql, [])?;
        }
        tx.commit()?;
        Ok(())
    }

    async fn insert_rows(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> Result<u64, SmartStoreError> {
        let sql = insert_sql(table, columns);
        debug!(sql = sql.as_str(), rows = rows.len(), "insert");

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut written = 0u64;
        {
            let mut stmt = tx.prepare(&sql)?;
            for row in rows {
                written += stmt.execute(params_from_iter(row.iter().map(to_duck)))? as u64;
            }
        }
        // Dropping an uncommitted transaction rolls it back.
        tx.commit()?;
        Ok(written)
    }

    async fn query_scalar(&self, query: &str) -> Result<u64, SmartStoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query)?;
        let mut rows = stmt.query([])?;

        let row = rows
            .next()?
            .ok_or_else(|| SmartStoreError::InternalError("No scalar value returned".into()))?;

        let value: i64 = row.get(0)?;
        u64::try_from(value)
            .map_err(|_| SmartStoreError::InternalError(format!("Negative scalar value: {}", value)))
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
