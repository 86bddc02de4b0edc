// smartstore-core/src/application/load.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::application::inputs::read_input;
use crate::domain::dataset::Dataset;
use crate::domain::entity::Entity;
use crate::domain::project::ProjectConfig;
use crate::domain::warehouse::{DELETE_ORDER, INSERT_ORDER, TableSchema, project};
use crate::error::SmartStoreError;
use crate::infrastructure::fs::save_json;
use crate::ports::tabular::TabularStore;
use crate::ports::warehouse::Warehouse;

/// Cleaned datasets of one run, keyed by entity. An entity left out loads as
/// an empty table.
#[derive(Debug, Default)]
pub struct WarehouseBatch {
    datasets: BTreeMap<Entity, Dataset>,
}

impl WarehouseBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, entity: Entity, dataset: Dataset) -> Self {
        self.insert(entity, dataset);
        self
    }

    pub fn insert(&mut self, entity: Entity, dataset: Dataset) {
        self.datasets.insert(entity, dataset);
    }

    fn take(&mut self, entity: Entity) -> Dataset {
        self.datasets.remove(&entity).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLoad {
    pub table: String,
    pub rows_in: usize,
    pub inserted: u64,
    pub dropped_uncoercible: usize,
    pub dropped_duplicate_keys: usize,
    /// `COUNT(*)` read back after the insert.
    pub row_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub engine: String,
    pub tables: Vec<TableLoad>,
}

impl LoadReport {
    pub fn table(&self, name: &str) -> Option<&TableLoad> {
        self.tables.iter().find(|t| t.table == name)
    }

    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|t| t.row_count).sum()
    }
}

fn load_failure(table: &str, err: SmartStoreError) -> SmartStoreError {
    SmartStoreError::LoadFailure {
        table: table.to_string(),
        reason: err.to_string(),
    }
}

/// Truncate-and-reload of the warehouse tables.
pub struct WarehouseLoader<'a> {
    warehouse: &'a dyn Warehouse,
}

impl<'a> WarehouseLoader<'a> {
    pub fn new(warehouse: &'a dyn Warehouse) -> Self {
        Self { warehouse }
    }

    /// Creates the three tables when absent. Safe to call on every run.
    #[instrument(skip(self))]
    pub async fn initialize_schema(&self) -> Result<(), SmartStoreError> {
        for schema in TableSchema::all() {
            self.warehouse
                .execute(&schema.create_sql())
                .await
                .map_err(|e| load_failure(schema.table, e))?;
        }
        info!(engine = self.warehouse.engine_name(), "warehouse schema ready");
        Ok(())
    }

    /// Replaces the content of every table with `batch`.
    ///
    /// All tables are emptied in one transaction, then each entity is
    /// inserted in its own transaction. A failed insert stops the reload;
    /// tables committed before it keep their new rows.
    #[instrument(skip_all)]
    pub async fn reload(&self, mut batch: WarehouseBatch) -> Result<LoadReport, SmartStoreError> {
        self.initialize_schema().await?;

        let deletes: Vec<String> = DELETE_ORDER
            .iter()
            .map(|e| TableSchema::for_entity(*e).delete_sql())
            .collect();
        let tables: Vec<&str> = DELETE_ORDER
            .iter()
            .map(|e| TableSchema::for_entity(*e).table)
            .collect();
        self.warehouse
            .execute_in_transaction(&deletes)
            .await
            .map_err(|e| load_failure(&tables.join(", "), e))?;

        let mut loads = Vec::with_capacity(INSERT_ORDER.len());
        for entity in INSERT_ORDER {
            let schema = TableSchema::for_entity(entity);
            let dataset = batch.take(entity);
            let rows_in = dataset.len();
            let projection = project(&schema, &dataset);

            let inserted = self
                .warehouse
                .insert_rows(schema.table, &projection.columns, &projection.rows)
                .await
                .map_err(|e| load_failure(schema.table, e))?;
            let row_count = self
                .warehouse
                .query_scalar(&schema.count_sql())
                .await
                .map_err(|e| load_failure(schema.table, e))?;

            info!(
                table = schema.table,
                rows_in,
                inserted,
                dropped = projection.dropped(),
                row_count,
                "table reloaded"
            );
            loads.push(TableLoad {
                table: schema.table.to_string(),
                rows_in,
                inserted,
                dropped_uncoercible: projection.dropped_uncoercible,
                dropped_duplicate_keys: projection.dropped_duplicate_keys,
                row_count,
            });
        }

        Ok(LoadReport {
            engine: self.warehouse.engine_name().to_string(),
            tables: loads,
        })
    }

    /// Current `COUNT(*)` of every table, in insert order.
    pub async fn row_counts(&self) -> Result<Vec<(String, u64)>, SmartStoreError> {
        let mut counts = Vec::with_capacity(INSERT_ORDER.len());
        for schema in TableSchema::all() {
            let count = self.warehouse.query_scalar(&schema.count_sql()).await?;
            counts.push((schema.table.to_string(), count));
        }
        Ok(counts)
    }
}

/// Loads the prepared files into the warehouse and writes
/// `load_results.json` to the target directory.
#[instrument(skip(store, warehouse, config))]
pub async fn run_load<S: TabularStore>(
    store: &S,
    warehouse: &dyn Warehouse,
    project_dir: &Path,
    config: &ProjectConfig,
) -> Result<LoadReport, SmartStoreError> {
    println!("🏗️  Loading prepared data into the warehouse...");
    let start_time = std::time::Instant::now();

    let mut batch = WarehouseBatch::new();
    for entity in Entity::ALL {
        let path = config.prepared_path(project_dir, entity);
        let (dataset, _) = read_input(store, entity, &path, config.strict_inputs)?;
        batch.insert(entity, dataset);
    }

    let report = WarehouseLoader::new(warehouse).reload(batch).await?;

    // FINALIZE
    if let Err(e) = warehouse.execute("CHECKPOINT").await {
        warn!(error = %e, "checkpoint failed");
    }

    for table in &report.tables {
        println!(
            "   ✅ {:<9} {} rows ({} dropped)",
            table.table,
            table.row_count,
            table.dropped_uncoercible + table.dropped_duplicate_keys
        );
    }
    save_json(
        &config.target_dir(project_dir).join("load_results.json"),
        &report,
    )?;
    println!(
        "✨ Warehouse loaded in {:.2}s ({} rows).",
        start_time.elapsed().as_secs_f64(),
        report.total_rows()
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::Value;
    use crate::domain::warehouse::SqlValue;
    use crate::infrastructure::adapters::DuckDBWarehouse;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    fn t(s: &str) -> Value {
        Value::text(s)
    }

    fn customers() -> Dataset {
        Dataset::from_rows(
            ["CustomerID", "Name", "Region", "JoinDate", "CustomerRewardPoints", "CustomerStatus"],
            vec![
                vec![t("1001"), t("Ann"), t("East"), t("2021-11-11"), Value::Int(10), t("Gold")],
                vec![t("1002"), t("Bo"), t("West"), t("2022-01-02"), Value::Int(0), t("New")],
            ],
        )
    }

    fn products() -> Dataset {
        Dataset::from_rows(
            ["ProductID", "ProductName", "UnitPrice", "ProductDiscountPercent"],
            vec![vec![t("101"), t("Laptop"), Value::Float(793.12), Value::Float(0.0)]],
        )
    }

    fn sales() -> Dataset {
        Dataset::from_rows(
            ["TransactionID", "CustomerID", "ProductID", "SaleAmount", "SalePaymentType"],
            vec![
                vec![t("1"), t("1001"), t("101"), Value::Float(39.99), t("Cash")],
                vec![t("2"), t("1002"), t("101"), t("oops"), t("Cash")],
                vec![t("1"), t("1002"), t("101"), Value::Float(5.0), t("Cash")],
            ],
        )
    }

    #[tokio::test]
    async fn test_reload_counts_match_valid_rows() -> Result<()> {
        let warehouse = DuckDBWarehouse::new(":memory:")?;
        let loader = WarehouseLoader::new(&warehouse);
        let batch = WarehouseBatch::new()
            .with(Entity::Customer, customers())
            .with(Entity::Product, products())
            .with(Entity::Sale, sales());

        let report = loader.reload(batch).await?;

        assert_eq!(report.table("customer").unwrap().row_count, 2);
        assert_eq!(report.table("product").unwrap().row_count, 1);
        let sales = report.table("sales").unwrap();
        assert_eq!(sales.row_count, 1);
        assert_eq!(sales.dropped_uncoercible, 1);
        assert_eq!(sales.dropped_duplicate_keys, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_reload_replaces_previous_contents() -> Result<()> {
        let warehouse = DuckDBWarehouse::new(":memory:")?;
        let loader = WarehouseLoader::new(&warehouse);

        loader
            .reload(WarehouseBatch::new().with(Entity::Customer, customers()))
            .await?;
        loader
            .reload(WarehouseBatch::new().with(Entity::Customer, customers()))
            .await?;
        let counts = loader.row_counts().await?;
        assert_eq!(counts[0], ("customer".to_string(), 2));

        loader.reload(WarehouseBatch::new()).await?;
        let counts = loader.row_counts().await?;
        assert!(counts.iter().all(|(_, c)| *c == 0));
        Ok(())
    }

    // --- MOCK WAREHOUSE ---
    #[derive(Clone, Default)]
    struct MockWarehouse {
        log: Arc<Mutex<Vec<String>>>,
        fail_on_table: Option<&'static str>,
    }

    #[async_trait]
    impl Warehouse for MockWarehouse {
        async fn execute(&self, query: &str) -> Result<(), SmartStoreError> {
            self.log.lock().unwrap().push(query.to_string());
            Ok(())
        }
        async fn execute_in_transaction(&self, statements: &[String]) -> Result<(), SmartStoreError> {
            self.log
                .lock()
                .unwrap()
                .push(format!("TX[{}]", statements.join("; ")));
            Ok(())
        }
        async fn insert_rows(
            &self,
            table: &str,
            _columns: &[&str],
            rows: &[Vec<SqlValue>],
        ) -> Result<u64, SmartStoreError> {
            if self.fail_on_table == Some(table) {
                return Err(SmartStoreError::InternalError("disk full".into()));
            }
            self.log.lock().unwrap().push(format!("INSERT {}", table));
            Ok(rows.len() as u64)
        }
        async fn query_scalar(&self, _query: &str) -> Result<u64, SmartStoreError> {
            Ok(0)
        }
        fn engine_name(&self) -> &str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_reload_statement_order() -> Result<()> {
        let warehouse = MockWarehouse::default();
        WarehouseLoader::new(&warehouse)
            .reload(WarehouseBatch::new())
            .await?;

        let log = warehouse.log.lock().unwrap().clone();
        let tail: Vec<&str> = log.iter().skip(3).map(String::as_str).collect();
        assert_eq!(
            tail,
            [
                "TX[DELETE FROM sales; DELETE FROM product; DELETE FROM customer]",
                "INSERT customer",
                "INSERT product",
                "INSERT sales",
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_failure_is_load_failure() -> Result<()> {
        let warehouse = MockWarehouse {
            fail_on_table: Some("product"),
            ..MockWarehouse::default()
        };
        let err = WarehouseLoader::new(&warehouse)
            .reload(WarehouseBatch::new().with(Entity::Customer, customers()))
            .await
            .unwrap_err();

        assert!(matches!(err, SmartStoreError::LoadFailure { ref table, .. } if table == "product"));
        let log = warehouse.log.lock().unwrap();
        assert!(log.contains(&"INSERT customer".to_string()));
        assert!(!log.contains(&"INSERT sales".to_string()));
        Ok(())
    }
}
