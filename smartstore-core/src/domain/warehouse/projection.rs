// smartstore-core/src/domain/warehouse/projection.rs

use std::collections::HashSet;
use tracing::{debug, info};

use super::schema::{SqlType, TableSchema};
use crate::domain::cleaning::numeric;
use crate::domain::dataset::{Dataset, Value};

/// A cell ready to be bound as a statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    BigInt(i64),
    Double(f64),
    Text(String),
}

/// Rows of one table, in schema column order, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub table: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<SqlValue>>,
    pub dropped_uncoercible: usize,
    pub dropped_duplicate_keys: usize,
}

impl Projection {
    pub fn dropped(&self) -> usize {
        self.dropped_uncoercible + self.dropped_duplicate_keys
    }
}

fn to_sql(value: &Value, sql_type: SqlType) -> Option<SqlValue> {
    match sql_type {
        SqlType::BigInt => numeric::to_i64(value).map(SqlValue::BigInt),
        SqlType::Double => numeric::to_f64(value).map(SqlValue::Double),
        SqlType::Varchar if value.is_missing() => None,
        SqlType::Varchar => Some(SqlValue::Text(value.to_string())),
    }
}

/// Maps a cleaned dataset onto the typed rows of `schema`.
///
/// Every warehouse column reads the cleaned column it is sourced from; any
/// other column, whatever its name, is ignored. Cells are coerced once more.
/// A row is dropped when a required cell cannot be coerced or when its key
/// was already seen; other failed cells load as NULL.
pub fn project(schema: &TableSchema, dataset: &Dataset) -> Projection {
    let positions: Vec<Option<usize>> = schema
        .columns
        .iter()
        .map(|c| dataset.column_index(c.source))
        .collect();
    for (column, position) in schema.columns.iter().zip(&positions) {
        if position.is_none() {
            debug!(table = schema.table, column = column.source, "column absent from cleaned data");
        }
    }

    let mut rows = Vec::with_capacity(dataset.len());
    let mut seen_keys: HashSet<i64> = HashSet::with_capacity(dataset.len());
    let mut dropped_uncoercible = 0;
    let mut dropped_duplicate_keys = 0;

    'rows: for raw in dataset.rows() {
        let mut row = Vec::with_capacity(schema.columns.len());
        for (column, position) in schema.columns.iter().zip(&positions) {
            let cell = position.and_then(|idx| to_sql(&raw[idx], column.sql_type));
            match cell {
                Some(value) => row.push(value),
                None if column.required => {
                    dropped_uncoercible += 1;
                    continue 'rows;
                }
                None => row.push(SqlValue::Null),
            }
        }

        if let Some(SqlValue::BigInt(key)) = row.first()
            && !seen_keys.insert(*key)
        {
            dropped_duplicate_keys += 1;
            continue;
        }
        rows.push(row);
    }

    info!(
        table = schema.table,
        rows = rows.len(),
        dropped_uncoercible,
        dropped_duplicate_keys,
        "projection ready"
    );

    Projection {
        table: schema.table,
        columns: schema.column_names(),
        rows,
        dropped_uncoercible,
        dropped_duplicate_keys,
    }
}
