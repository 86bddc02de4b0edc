// smartstore-core/src/domain/cleaning/scrubber.rs

use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::report::StepCount;
use super::rules::ColumnKind;
use super::{dates, numeric};
use crate::domain::dataset::{Dataset, Value};

/// Default output column of [`Scrubber::parse_date`].
pub const STANDARD_DATETIME: &str = "StandardDateTime";

/// What `fill_missing` substitutes for absent cells.
#[derive(Debug, Clone, PartialEq)]
pub enum FillSpec {
    /// Every column.
    All(Value),
    /// Only the listed columns; names absent from the dataset are ignored.
    PerColumn(Vec<(String, Value)>),
}

impl FillSpec {
    pub fn column(name: impl Into<String>, value: impl Into<Value>) -> Self {
        FillSpec::PerColumn(vec![(name.into(), value.into())])
    }
}

impl From<Value> for FillSpec {
    fn from(value: Value) -> Self {
        FillSpec::All(value)
    }
}

impl From<&str> for FillSpec {
    fn from(value: &str) -> Self {
        FillSpec::All(Value::text(value))
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for FillSpec {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        FillSpec::PerColumn(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Fluent, in-place cleaning over an owned [`Dataset`].
///
/// Every operation is total: malformed cells are repaired or flagged, never
/// reported as errors, and operations on absent columns are no-ops. Each call
/// records a [`StepCount`] and logs it.
///
/// ```ignore
/// let cleaned = Scrubber::new(raw)
///     .fill_missing("Unknown")
///     .deduplicate()
///     .normalize_text("region")
///     .parse_date("sale_date")
///     .dataset()
///     .clone();
/// ```
#[derive(Debug)]
pub struct Scrubber {
    dataset: Dataset,
    steps: Vec<StepCount>,
}

impl Scrubber {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            steps: Vec::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn steps(&self) -> &[StepCount] {
        &self.steps
    }

    pub fn finish(self) -> Dataset {
        self.dataset
    }

    pub fn into_parts(self) -> (Dataset, Vec<StepCount>) {
        (self.dataset, self.steps)
    }

    fn record(&mut self, step: &str, column: Option<&str>, rows_removed: usize, cells_changed: usize) {
        if rows_removed > 0 || cells_changed > 0 {
            info!(
                step,
                column = column.unwrap_or("*"),
                rows_removed,
                cells_changed,
                "cleaning step"
            );
        } else {
            debug!(step, column = column.unwrap_or("*"), "cleaning step (no change)");
        }
        self.steps.push(StepCount {
            step: step.to_string(),
            column: column.map(str::to_string),
            rows_removed,
            cells_changed,
        });
    }

    // Applies `f` to every cell of one column, counting cells that changed.
    fn map_column<F>(&mut self, idx: usize, mut f: F) -> usize
    where
        F: FnMut(&Value) -> Value,
    {
        let mut changed = 0;
        for row in self.dataset.rows_mut().iter_mut() {
            let next = f(&row[idx]);
            if next != row[idx] {
                row[idx] = next;
                changed += 1;
            }
        }
        changed
    }

    fn fill_column(&mut self, idx: usize, value: &Value) -> usize {
        self.map_column(idx, |v| if v.is_null() { value.clone() } else { v.clone() })
    }

    /// Substitutes a default for every `Null` cell.
    pub fn fill_missing(&mut self, spec: impl Into<FillSpec>) -> &mut Self {
        let mut changed = 0;
        match spec.into() {
            FillSpec::All(value) => {
                for idx in 0..self.dataset.columns().len() {
                    changed += self.fill_column(idx, &value);
                }
                self.record("fill_missing", None, 0, changed);
            }
            FillSpec::PerColumn(pairs) => {
                for (column, value) in &pairs {
                    if let Some(idx) = self.dataset.column_index(column) {
                        let filled = self.fill_column(idx, value);
                        changed += filled;
                    }
                }
                let column = match pairs.as_slice() {
                    [(single, _)] => Some(single.as_str()),
                    _ => None,
                };
                let column = column.map(str::to_string);
                self.record("fill_missing", column.as_deref(), 0, changed);
            }
        }
        self
    }

    /// Removes exact full-row duplicates, keeping the first occurrence.
    pub fn deduplicate(&mut self) -> &mut Self {
        let before = self.dataset.len();
        let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(before);
        self.dataset.rows_mut().retain(|row| seen.insert(row.clone()));
        let removed = before - self.dataset.len();
        self.record("deduplicate", None, removed, 0);
        self
    }

    /// Keeps the first row for each value of `column`. Rows with a missing
    /// value in that column are left alone.
    pub fn deduplicate_on(&mut self, column: &str) -> &mut Self {
        let Some(idx) = self.dataset.column_index(column) else {
            self.record("deduplicate_key", Some(column), 0, 0);
            return self;
        };
        let before = self.dataset.len();
        let mut seen: HashSet<Value> = HashSet::with_capacity(before);
        self.dataset
            .rows_mut()
            .retain(|row| row[idx].is_missing() || seen.insert(row[idx].clone()));
        let removed = before - self.dataset.len();
        self.record("deduplicate_key", Some(column), removed, 0);
        self
    }

    /// Lower-cases and trims every text value of `column`.
    pub fn normalize_text(&mut self, column: &str) -> &mut Self {
        let changed = match self.dataset.column_index(column) {
            Some(idx) => self.map_column(idx, |v| match v {
                Value::Text(s) => Value::Text(s.trim().to_lowercase()),
                other => other.clone(),
            }),
            None => 0,
        };
        self.record("normalize_text", Some(column), 0, changed);
        self
    }

    /// `normalize_text` over every column holding at least one text value.
    pub fn normalize_all_text(&mut self) -> &mut Self {
        let text_columns: Vec<String> = self
            .dataset
            .columns()
            .iter()
            .enumerate()
            .filter(|(idx, _)| {
                self.dataset
                    .rows()
                    .iter()
                    .any(|row| matches!(row[*idx], Value::Text(_)))
            })
            .map(|(_, name)| name.clone())
            .collect();
        for column in text_columns {
            self.normalize_text(&column);
        }
        self
    }

    /// Renames the columns present in both the dataset and `mapping`.
    pub fn rename_columns<I, K, V>(&mut self, mapping: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut renamed = 0;
        for (from, to) in mapping {
            let (from, to) = (from.as_ref(), to.as_ref());
            let Some(idx) = self.dataset.column_index(from) else {
                continue;
            };
            if from == to {
                continue;
            }
            if self.dataset.has_column(to) {
                warn!(from, to, "rename skipped: target column already exists");
                continue;
            }
            self.dataset.columns_mut()[idx] = to.to_string();
            renamed += 1;
        }
        self.record("rename_columns", None, 0, renamed);
        self
    }

    /// Parses `column` into [`STANDARD_DATETIME`].
    pub fn parse_date(&mut self, column: &str) -> &mut Self {
        self.parse_date_into(column, STANDARD_DATETIME)
    }

    /// Parses `column` into `output_column` (created when absent, may be the
    /// source column itself). Unparseable values become `Value::Invalid`.
    pub fn parse_date_into(&mut self, column: &str, output_column: &str) -> &mut Self {
        let Some(src) = self.dataset.column_index(column) else {
            self.record("parse_date", Some(column), 0, 0);
            return self;
        };
        let dst = match self.dataset.column_index(output_column) {
            Some(idx) => idx,
            None => self.dataset.add_column(output_column, Value::Null),
        };

        let mut changed = 0;
        let mut invalid = 0;
        for row in self.dataset.rows_mut().iter_mut() {
            let parsed = dates::coerce(&row[src]);
            if parsed == Value::Invalid {
                invalid += 1;
            }
            if parsed != row[dst] {
                row[dst] = parsed;
                changed += 1;
            }
        }
        if invalid > 0 {
            info!(column, invalid, "unparseable dates flagged");
        }
        self.record("parse_date", Some(column), 0, changed);
        self
    }

    /// Adds `name` filled with `fill` when the dataset lacks it.
    pub fn ensure_column(&mut self, name: &str, fill: Value) -> &mut Self {
        if self.dataset.has_column(name) {
            return self;
        }
        self.dataset.add_column(name, fill);
        let filled = self.dataset.len();
        self.record("synthesize_column", Some(name), 0, filled);
        self
    }

    /// Casts the cells of `column` to numbers; unreadable cells become `Null`.
    pub fn coerce_numeric(&mut self, column: &str) -> &mut Self {
        let changed = match self.dataset.column_index(column) {
            Some(idx) => self.map_column(idx, numeric::coerce),
            None => 0,
        };
        self.record("coerce_numeric", Some(column), 0, changed);
        self
    }

    /// Replaces `Null` and `Invalid` cells of `column`.
    pub fn replace_missing(&mut self, column: &str, value: Value) -> &mut Self {
        let changed = match self.dataset.column_index(column) {
            Some(idx) => self.map_column(idx, |v| if v.is_missing() { value.clone() } else { v.clone() }),
            None => 0,
        };
        self.record("refill", Some(column), 0, changed);
        self
    }

    /// Keeps the rows for which `keep` returns true.
    pub fn retain_rows<F>(&mut self, step: &str, column: Option<&str>, mut keep: F) -> &mut Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let before = self.dataset.len();
        self.dataset.rows_mut().retain(|row| keep(row));
        let removed = before - self.dataset.len();
        self.record(step, column, removed, 0);
        self
    }

    /// Maps every value of `column` onto the closed set `allowed`.
    ///
    /// Matching ignores case and surrounding blanks and rewrites to the
    /// canonical spelling; everything else (missing included) becomes
    /// `catch_all`.
    pub fn restrict_to_set(&mut self, column: &str, allowed: &[&str], catch_all: &str) -> &mut Self {
        let changed = match self.dataset.column_index(column) {
            Some(idx) => self.map_column(idx, |v| {
                let canonical = match v {
                    Value::Text(s) => allowed
                        .iter()
                        .find(|a| a.eq_ignore_ascii_case(s.trim()))
                        .copied(),
                    _ => None,
                };
                Value::text(canonical.unwrap_or(catch_all))
            }),
            None => 0,
        };
        self.record("restrict_to_set", Some(column), 0, changed);
        self
    }

    /// Casts `column` to its canonical type.
    pub fn cast(&mut self, column: &str, kind: ColumnKind) -> &mut Self {
        let changed = match self.dataset.column_index(column) {
            Some(idx) => self.map_column(idx, |v| cast_value(v, kind)),
            None => 0,
        };
        self.record("cast", Some(column), 0, changed);
        self
    }

    /// Moves the listed columns to the front, in the given order. Unlisted
    /// columns follow in their current relative order.
    pub fn reorder_columns(&mut self, order: &[&str]) -> &mut Self {
        let columns = self.dataset.columns();
        let mut permutation: Vec<usize> = order
            .iter()
            .filter_map(|name| columns.iter().position(|c| c == name))
            .collect();
        let listed: HashSet<usize> = permutation.iter().copied().collect();
        permutation.extend((0..columns.len()).filter(|idx| !listed.contains(idx)));

        if permutation.iter().enumerate().all(|(pos, idx)| pos == *idx) {
            return self;
        }

        let reordered: Vec<String> = permutation.iter().map(|&i| columns[i].clone()).collect();
        *self.dataset.columns_mut() = reordered;
        for row in self.dataset.rows_mut().iter_mut() {
            let old = std::mem::take(row);
            *row = permutation.iter().map(|&i| old[i].clone()).collect();
        }
        self
    }
}

fn cast_value(value: &Value, kind: ColumnKind) -> Value {
    if value.is_null() {
        return Value::Null;
    }
    match kind {
        ColumnKind::Key | ColumnKind::Text => match value {
            Value::Text(_) => value.clone(),
            Value::Invalid => Value::Null,
            other => Value::Text(other.to_string()),
        },
        ColumnKind::Integer => match numeric::coerce(value) {
            Value::Float(f) => Value::Int(f.trunc() as i64),
            other => other,
        },
        ColumnKind::Float => match numeric::coerce(value) {
            Value::Int(i) => Value::Float(i as f64),
            other => other,
        },
        ColumnKind::Date => dates::coerce(value),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn t(s: &str) -> Value {
        Value::text(s)
    }

    // Mirrors a small raw customer extract with one exact duplicate.
    fn sample() -> Dataset {
        Dataset::from_rows(
            ["cust_id", "customer_name", "sale_date"],
            vec![
                vec![Value::Int(1), t("Alice"), t("2025-01-01")],
                vec![Value::Int(2), t("Bob"), t("2025-01-02")],
                vec![Value::Int(2), t("Bob"), t("2025-01-02")],
                vec![Value::Null, Value::Null, t("2025-01-03")],
            ],
        )
    }

    #[test]
    fn test_remove_duplicates() {
        let mut scrubber = Scrubber::new(sample());
        scrubber.deduplicate();

        assert_eq!(scrubber.dataset().len(), 3);
        assert_eq!(scrubber.steps()[0].rows_removed, 1);
    }

    #[test]
    fn test_deduplicate_keeps_first_seen_order() {
        let ds = Dataset::from_rows(
            ["k"],
            vec![
                vec![t("b")],
                vec![t("a")],
                vec![t("b")],
                vec![t("c")],
                vec![t("a")],
            ],
        );
        let mut scrubber = Scrubber::new(ds);
        scrubber.deduplicate();

        let values: Vec<String> = scrubber
            .dataset()
            .column_values("k")
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(values, ["b", "a", "c"]);
    }

    #[test]
    fn test_handle_missing_data() {
        let mut scrubber = Scrubber::new(sample());
        scrubber.fill_missing("Unknown");

        let any_null = scrubber
            .dataset()
            .rows()
            .iter()
            .flatten()
            .any(|v| v.is_null());
        assert!(!any_null);
        assert_eq!(scrubber.steps()[0].cells_changed, 2);
    }

    #[test]
    fn test_fill_missing_per_column_ignores_unknown_columns() {
        let mut scrubber = Scrubber::new(sample());
        scrubber.fill_missing(FillSpec::from_iter([
            ("customer_name", t("Unknown Customer")),
            ("does_not_exist", t("x")),
        ]));

        let ds = scrubber.dataset();
        assert_eq!(ds.value(3, "customer_name").unwrap(), &t("Unknown Customer"));
        assert!(ds.value(3, "cust_id").unwrap().is_null());
        assert!(!ds.has_column("does_not_exist"));
    }

    #[test]
    fn test_normalize_text_only_touches_strings() {
        let ds = Dataset::from_rows(
            ["region"],
            vec![vec![t("  East  ")], vec![Value::Int(4)], vec![Value::Null]],
        );
        let mut scrubber = Scrubber::new(ds);
        scrubber.normalize_text("region").normalize_text("absent");

        let values = scrubber.dataset().column_values("region");
        assert_eq!(values, [&t("east"), &Value::Int(4), &Value::Null]);
    }

    #[test]
    fn test_rename_columns() {
        let mut scrubber = Scrubber::new(sample());
        scrubber.rename_columns([("cust_id", "CustomerID"), ("ghost", "Ghost")]);

        let cols = scrubber.dataset().columns();
        assert!(cols.contains(&"CustomerID".to_string()));
        assert!(!cols.contains(&"Ghost".to_string()));
        assert_eq!(cols.len(), 3);
    }

    #[test]
    fn test_rename_never_creates_duplicate_columns() {
        let ds = Dataset::new(["Name", "customer_name"]);
        let mut scrubber = Scrubber::new(ds);
        scrubber.rename_columns([("customer_name", "Name")]);

        assert_eq!(scrubber.dataset().columns(), ["Name", "customer_name"]);
    }

    #[test]
    fn test_parse_dates() {
        let mut ds = sample();
        ds.push_row(vec![Value::Int(9), t("Zed"), t("garbage")]);
        let mut scrubber = Scrubber::new(ds);
        scrubber.parse_date("sale_date");

        let ds = scrubber.dataset();
        assert!(ds.has_column(STANDARD_DATETIME));
        assert_eq!(ds.value(0, STANDARD_DATETIME).unwrap().to_string(), "2025-01-01");
        assert_eq!(ds.value(4, STANDARD_DATETIME).unwrap(), &Value::Invalid);
        assert_eq!(ds.len(), 5);
    }

    #[test]
    fn test_restrict_to_set_canonicalizes() {
        let ds = Dataset::from_rows(
            ["pay"],
            vec![vec![t("cash")], vec![t("Bitcoin")], vec![Value::Null], vec![t(" GiftCard ")]],
        );
        let mut scrubber = Scrubber::new(ds);
        scrubber.restrict_to_set("pay", &["Cash", "GiftCard"], "Other");

        let values = scrubber.dataset().column_values("pay");
        assert_eq!(values, [&t("Cash"), &t("Other"), &t("Other"), &t("GiftCard")]);
    }

    #[test]
    fn test_cast_and_reorder() {
        let ds = Dataset::from_rows(
            ["extra", "points", "id"],
            vec![vec![t("x"), Value::Float(10.7), Value::Int(5)]],
        );
        let mut scrubber = Scrubber::new(ds);
        scrubber
            .cast("points", ColumnKind::Integer)
            .cast("id", ColumnKind::Key)
            .reorder_columns(&["id", "points"]);

        let ds = scrubber.finish();
        assert_eq!(ds.columns(), ["id", "points", "extra"]);
        assert_eq!(ds.rows()[0], vec![t("5"), Value::Int(10), t("x")]);
    }

    #[test]
    fn test_chained_pass_is_idempotent() {
        let run = |ds: Dataset| {
            let mut scrubber = Scrubber::new(ds);
            scrubber
                .fill_missing("Unknown")
                .deduplicate()
                .normalize_all_text()
                .rename_columns([("cust_id", "CustomerID")])
                .parse_date("sale_date");
            scrubber.finish()
        };

        let once = run(sample());
        let twice = run(once.clone());
        assert_eq!(once, twice);
    }
}
