// smartstore/src/commands/load.rs
//
// USE CASE: Reload the warehouse from the prepared files.

use anyhow::Context;
use comfy_table::Table;
use std::path::{Path, PathBuf};

use smartstore_core::application::{LoadReport, run_load};
use smartstore_core::infrastructure::adapters::DuckDBWarehouse;
use smartstore_core::infrastructure::config::ProjectConfig;
use smartstore_core::infrastructure::tabular::CsvStore;

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let config = super::load_config(&project_dir)?;
    load(&project_dir, &config).await
}

pub(crate) async fn load(project_dir: &Path, config: &ProjectConfig) -> anyhow::Result<()> {
    let db_path = config.warehouse_path(project_dir);
    println!("   Engine: DuckDB 🦆 ({})", db_path.display());
    let warehouse = DuckDBWarehouse::new(&db_path.to_string_lossy())
        .with_context(|| format!("Failed to initialize DuckDB at {}", db_path.display()))?;

    let report = run_load(&CsvStore::new(), &warehouse, project_dir, config).await?;
    println!("{}", counts_table(&report));
    Ok(())
}

fn counts_table(report: &LoadReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["table", "rows", "inserted", "dropped (invalid)", "dropped (dup key)"]);
    for load in &report.tables {
        table.add_row(vec![
            load.table.clone(),
            load.row_count.to_string(),
            load.inserted.to_string(),
            load.dropped_uncoercible.to_string(),
            load.dropped_duplicate_keys.to_string(),
        ]);
    }
    table
}
