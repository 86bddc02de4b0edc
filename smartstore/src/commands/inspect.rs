// smartstore/src/commands/inspect.rs
//
// USE CASE: Inspect a warehouse table (schema + sample rows).

use comfy_table::Table;
use duckdb::types::Value;
use duckdb::{Connection, Row};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use smartstore_core::infrastructure::config::load_project_config;

fn render(value: Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::BigInt(i) => i.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Double(f) => f.to_string(),
        Value::Text(s) => s,
        other => format!("{:?}", other),
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn execute(
    project_dir: PathBuf,
    db_path: Option<PathBuf>,
    table: String,
    limit: usize,
) -> Result<()> {
    let db_path = match db_path {
        Some(path) => path,
        None => {
            let config = load_project_config(&project_dir)?;
            config.warehouse_path(&project_dir)
        }
    };
    if !db_path.exists() {
        return Err(miette::miette!(
            "❌ Database not found at: {}\n👉 Have you run 'smartstore load'?",
            db_path.display()
        ));
    }
    if !is_identifier(&table) {
        return Err(miette::miette!("❌ Invalid table name: '{}'", table));
    }

    let conn = Connection::open(&db_path).into_diagnostic()?;

    println!("\n🔍 Inspecting Table: '{}'", table);

    let mut stmt_cols = conn
        .prepare(&format!("PRAGMA table_info('{}')", table))
        .into_diagnostic()?;
    let columns: Vec<(String, String)> = stmt_cols
        .query_map([], |row: &Row| Ok((row.get("name")?, row.get("type")?)))
        .into_diagnostic()?
        .collect::<Result<Vec<_>, _>>()
        .into_diagnostic()?;
    if columns.is_empty() {
        return Err(miette::miette!("❌ Table '{}' not found", table));
    }

    let mut schema = Table::new();
    schema.set_header(vec!["column", "type"]);
    for (name, data_type) in &columns {
        schema.add_row(vec![name.as_str(), data_type.as_str()]);
    }
    println!("{}", schema);

    let count: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .into_diagnostic()?;
    println!("   --- Rows: {} (showing up to {}) ---", count, limit);

    let mut sample = Table::new();
    sample.set_header(columns.iter().map(|(name, _)| name.as_str()));

    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {} LIMIT {}", table, limit))
        .into_diagnostic()?;
    let mut rows = stmt.query([]).into_diagnostic()?;
    while let Some(row) = rows.next().into_diagnostic()? {
        let values: Vec<String> = (0..columns.len())
            .map(|i| match row.get::<_, Value>(i) {
                Ok(val) => render(val),
                Err(_) => "ERROR".to_string(),
            })
            .collect();
        sample.add_row(values);
    }
    println!("{}", sample);

    Ok(())
}
