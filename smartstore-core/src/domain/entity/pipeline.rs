// smartstore-core/src/domain/entity/pipeline.rs

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use super::{Entity, customer, product, sale};
use crate::domain::cleaning::{CleaningReport, ColumnKind, ColumnRule, FillSpec, Scrubber};
use crate::domain::dataset::{Dataset, Value};

/// Label given to enumerated values outside their closed set.
pub const CATCH_ALL: &str = "Other";

/// Run-scoped inputs of the cleaning rules. `today` replaces missing or
/// unreadable dates.
#[derive(Debug, Clone, Copy)]
pub struct CleaningContext {
    pub today: NaiveDate,
}

impl CleaningContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub dataset: Dataset,
    pub report: CleaningReport,
}

/// Fixed rule set of one entity, applied through the [`Scrubber`].
#[derive(Debug, Clone)]
pub struct EntityPipeline {
    entity: Entity,
    key: &'static str,
    rules: Vec<ColumnRule>,
}

impl EntityPipeline {
    pub fn new(entity: Entity, key: &'static str, rules: Vec<ColumnRule>) -> Self {
        Self { entity, key, rules }
    }

    pub fn for_entity(entity: Entity) -> Self {
        match entity {
            Entity::Customer => customer::pipeline(),
            Entity::Product => product::pipeline(),
            Entity::Sale => sale::pipeline(),
        }
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    // Alias -> canonical renames for the columns this input actually carries.
    fn alias_renames(&self, dataset: &Dataset) -> Vec<(&'static str, &'static str)> {
        self.rules
            .iter()
            .filter(|rule| !dataset.has_column(rule.name))
            .filter_map(|rule| {
                rule.aliases
                    .iter()
                    .find(|alias| dataset.has_column(alias))
                    .map(|alias| (*alias, rule.name))
            })
            .collect()
    }

    fn indices(&self, dataset: &Dataset, rules: &[&ColumnRule]) -> Vec<usize> {
        rules
            .iter()
            .filter_map(|rule| dataset.column_index(rule.name))
            .collect()
    }

    /// Cleans one raw batch into a Cleaned Record set.
    ///
    /// Order: harmonize names, full-row dedupe, fill / synthesize, coerce and
    /// re-fill, drop invalid rows then duplicate keys, close enumerations,
    /// cast.
    #[instrument(skip_all, fields(entity = %self.entity))]
    pub fn run(&self, dataset: Dataset, ctx: &CleaningContext) -> CleaningOutcome {
        let rows_in = dataset.len();
        let mut scrubber = Scrubber::new(dataset);

        // 0. Column names
        let renames = self.alias_renames(scrubber.dataset());
        scrubber.rename_columns(renames);
        if !scrubber.dataset().has_column(self.key) {
            warn!(key = self.key, "key column absent from input, no row can be kept");
        }

        // 1. Exact duplicates
        scrubber.deduplicate();

        // 2. Defaults
        for rule in &self.rules {
            let default = rule.default.resolve(ctx.today);
            scrubber.ensure_column(rule.name, default.clone().unwrap_or(Value::Null));
            if let Some(value) = default {
                scrubber.fill_missing(FillSpec::column(rule.name, value));
            }
        }

        // 3. Coercion, then re-fill what coercion emptied
        for rule in &self.rules {
            if rule.kind.is_numeric() {
                scrubber.coerce_numeric(rule.name);
            } else if rule.kind == ColumnKind::Date {
                scrubber.parse_date_into(rule.name, rule.name);
            } else {
                continue;
            }
            if let Some(value) = rule.default.resolve(ctx.today) {
                scrubber.replace_missing(rule.name, value);
            }
        }

        // 4. Hard predicates
        let required: Vec<&ColumnRule> = self.rules.iter().filter(|r| r.is_required()).collect();
        let required_idx = self.indices(scrubber.dataset(), &required);
        scrubber.retain_rows("drop_missing_required", None, |row| {
            required_idx.iter().all(|&i| !row[i].is_missing())
        });

        for rule in self.rules.iter().filter(|r| r.validity.is_some()) {
            let (Some(validity), Some(idx)) = (rule.validity, scrubber.dataset().column_index(rule.name))
            else {
                continue;
            };
            scrubber.retain_rows("drop_invalid", Some(rule.name), |row| {
                row[idx].as_f64().is_some_and(|x| validity.accepts(x))
            });
        }

        scrubber.deduplicate_on(self.key);

        // 5. Closed value sets
        for rule in &self.rules {
            if let Some(allowed) = rule.allowed {
                scrubber.restrict_to_set(rule.name, allowed, CATCH_ALL);
            }
        }

        // 6. Canonical types
        for rule in &self.rules {
            scrubber.cast(rule.name, rule.kind);
        }
        scrubber.reorder_columns(&self.column_names());

        let (dataset, steps) = scrubber.into_parts();
        let report = CleaningReport {
            entity: self.entity.to_string(),
            rows_in,
            rows_out: dataset.len(),
            steps,
        };
        info!(
            rows_in,
            rows_out = report.rows_out,
            rows_removed = report.rows_removed(),
            cells_changed = report.cells_changed(),
            "entity cleaned"
        );

        CleaningOutcome { dataset, report }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entity::sale::PAYMENT_TYPES;
    use crate::infrastructure::tabular::CsvStore;

    fn ctx() -> CleaningContext {
        CleaningContext::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn t(s: &str) -> Value {
        Value::text(s)
    }

    fn assert_no_missing(outcome: &CleaningOutcome, pipeline: &EntityPipeline) {
        for name in pipeline.column_names() {
            let values = outcome.dataset.column_values(name);
            assert_eq!(values.len(), outcome.dataset.len(), "column {} absent", name);
            assert!(
                values.iter().all(|v| !v.is_missing()),
                "column {} still has missing values",
                name
            );
        }
    }

    fn messy_sales() -> Dataset {
        Dataset::from_rows(
            [
                "TransactionID",
                "SaleDate",
                "CustomerID",
                "ProductID",
                "StoreID",
                "CampaignID",
                "SaleAmount",
                "DiscountPercent",
                "SalePaymentType",
            ],
            vec![
                vec![
                    Value::Int(1),
                    t("2025-01-10"),
                    Value::Int(1001),
                    Value::Int(101),
                    Value::Int(401),
                    Value::Int(0),
                    Value::Float(39.99),
                    Value::Int(10),
                    t("CreditCard"),
                ],
                vec![
                    Value::Int(2),
                    t("yesterday"),
                    Value::Null,
                    Value::Int(102),
                    Value::Null,
                    Value::Null,
                    t("12%"),
                    Value::Int(0),
                    t("Bitcoin"),
                ],
                vec![
                    Value::Int(3),
                    Value::Null,
                    Value::Int(1003),
                    Value::Int(103),
                    Value::Int(403),
                    t("x"),
                    Value::Float(-5.0),
                    Value::Int(5),
                    t("Cash"),
                ],
                vec![
                    Value::Int(4),
                    t("2025-02-01"),
                    Value::Int(1004),
                    Value::Int(104),
                    Value::Int(404),
                    Value::Int(2),
                    Value::Null,
                    Value::Int(5),
                    t("cash"),
                ],
                vec![
                    Value::Null,
                    t("2025-02-02"),
                    Value::Int(1005),
                    Value::Int(105),
                    Value::Int(405),
                    Value::Int(1),
                    Value::Float(10.0),
                    Value::Int(5),
                    Value::Null,
                ],
            ],
        )
    }

    #[test]
    fn test_customer_scenario_defaults() {
        let raw = Dataset::from_rows(
            ["cust_id", "customer_name", "JoinDate"],
            vec![vec![Value::Int(5), Value::Null, t("not-a-date")]],
        );
        let outcome = EntityPipeline::for_entity(Entity::Customer).run(raw, &ctx());
        let ds = &outcome.dataset;

        assert_eq!(ds.len(), 1);
        assert_eq!(
            ds.columns(),
            [
                "CustomerID",
                "Name",
                "Region",
                "JoinDate",
                "CustomerRewardPoints",
                "CustomerStatus"
            ]
        );
        assert_eq!(ds.value(0, "CustomerID").unwrap(), &t("5"));
        assert_eq!(ds.value(0, "CustomerStatus").unwrap(), &t("New"));
        assert_eq!(ds.value(0, "Name").unwrap(), &t("Unknown Customer"));
        assert_eq!(ds.value(0, "Region").unwrap(), &t("Unknown"));
        assert_eq!(ds.value(0, "JoinDate").unwrap(), &Value::date(ctx().today));
        assert_eq!(ds.value(0, "CustomerRewardPoints").unwrap(), &Value::Int(0));
    }

    #[test]
    fn test_customer_reward_points_rules() {
        let raw = Dataset::from_rows(
            ["CustomerID", "CustomerRewardPoints"],
            vec![
                vec![Value::Int(1), Value::Int(-10)],
                vec![Value::Int(2), t("lots")],
                vec![Value::Int(3), Value::Float(12.9)],
            ],
        );
        let outcome = EntityPipeline::for_entity(Entity::Customer).run(raw, &ctx());
        let points = outcome.dataset.column_values("CustomerRewardPoints");

        assert_eq!(points, [&Value::Int(0), &Value::Int(12)]);
        assert_eq!(outcome.report.removed_by("drop_invalid"), 1);
    }

    #[test]
    fn test_sale_discount_out_of_range_dropped_valid_twin_kept() {
        let columns = ["TransactionID", "SaleAmount", "DiscountPercent", "SalePaymentType"];
        let raw = Dataset::from_rows(
            columns,
            vec![
                vec![Value::Int(7), Value::Float(20.0), Value::Int(150), t("Cash")],
                vec![Value::Int(7), Value::Float(20.0), Value::Int(50), t("Cash")],
            ],
        );
        let outcome = EntityPipeline::for_entity(Entity::Sale).run(raw, &ctx());

        assert_eq!(outcome.dataset.len(), 1);
        assert_eq!(
            outcome.dataset.value(0, "DiscountPercent").unwrap(),
            &Value::Float(50.0)
        );
    }

    #[test]
    fn test_sale_payment_type_closed_set() {
        let outcome = EntityPipeline::for_entity(Entity::Sale).run(messy_sales(), &ctx());
        let ds = &outcome.dataset;

        // Row 3 negative amount, row 4 missing amount, row 5 missing key.
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.value(0, "SalePaymentType").unwrap(), &t("CreditCard"));
        assert_eq!(ds.value(1, "SalePaymentType").unwrap(), &t("Other"));
    }

    #[test]
    fn test_sale_repairs_ids_dates_and_amounts() {
        let outcome = EntityPipeline::for_entity(Entity::Sale).run(messy_sales(), &ctx());
        let ds = &outcome.dataset;

        assert_eq!(ds.value(1, "TransactionID").unwrap(), &t("2"));
        assert_eq!(ds.value(1, "CustomerID").unwrap(), &t("0"));
        assert_eq!(ds.value(1, "StoreID").unwrap(), &t("0"));
        assert_eq!(ds.value(1, "CampaignID").unwrap(), &Value::Int(0));
        assert_eq!(ds.value(1, "SaleAmount").unwrap(), &Value::Float(12.0));
        assert_eq!(ds.value(1, "SaleDate").unwrap(), &Value::date(ctx().today));
        assert_eq!(ds.value(0, "SaleDate").unwrap().to_string(), "2025-01-10");
    }

    #[test]
    fn test_sale_validity_closure() {
        let outcome = EntityPipeline::for_entity(Entity::Sale).run(messy_sales(), &ctx());
        let ds = &outcome.dataset;

        for row in 0..ds.len() {
            let amount = ds.value(row, "SaleAmount").unwrap().as_f64().unwrap();
            let discount = ds.value(row, "DiscountPercent").unwrap().as_f64().unwrap();
            let payment = ds.value(row, "SalePaymentType").unwrap().to_string();
            assert!(amount >= 0.0);
            assert!((0.0..=100.0).contains(&discount));
            assert!(PAYMENT_TYPES.contains(&payment.as_str()) || payment == CATCH_ALL);
        }
    }

    #[test]
    fn test_product_rules() {
        let raw = Dataset::from_rows(
            ["product_id", "product_name", "unit_price", "discount_percent"],
            vec![
                vec![Value::Int(101), t("Laptop"), Value::Float(793.12), Value::Null],
                vec![Value::Int(102), Value::Null, t("free"), Value::Int(5)],
                vec![Value::Int(103), t("Ghost"), Value::Float(-1.0), Value::Int(0)],
                vec![Value::Int(101), t("Laptop v2"), Value::Float(10.0), Value::Int(0)],
            ],
        );
        let pipeline = EntityPipeline::for_entity(Entity::Product);
        let outcome = pipeline.run(raw, &ctx());
        let ds = &outcome.dataset;

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.value(0, "ProductName").unwrap(), &t("Laptop"));
        assert_eq!(ds.value(0, "ProductDiscountPercent").unwrap(), &Value::Float(0.0));
        assert_eq!(ds.value(1, "ProductName").unwrap(), &t("Unknown"));
        assert_eq!(ds.value(1, "UnitPrice").unwrap(), &Value::Float(0.0));
        assert_eq!(ds.value(1, "Category").unwrap(), &t("Unknown"));
        assert_eq!(outcome.report.removed_by("deduplicate_key"), 1);
        assert_no_missing(&outcome, &pipeline);
    }

    #[test]
    fn test_fill_totality_for_every_entity() {
        for entity in Entity::ALL {
            let pipeline = EntityPipeline::for_entity(entity);
            let outcome = pipeline.run(messy_sales(), &ctx());
            assert_no_missing(&outcome, &pipeline);

            let empty = pipeline.run(Dataset::default(), &ctx());
            assert!(empty.dataset.is_empty());
            assert_eq!(empty.dataset.columns(), pipeline.column_names().as_slice());
        }
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        for entity in Entity::ALL {
            let pipeline = EntityPipeline::for_entity(entity);
            let once = pipeline.run(messy_sales(), &ctx());
            let twice = pipeline.run(once.dataset.clone(), &ctx());

            assert_eq!(once.dataset, twice.dataset, "{} not idempotent", entity);
            assert_eq!(twice.report.rows_removed(), 0);
        }
    }

    #[test]
    fn test_extra_columns_pass_through() {
        let raw = Dataset::from_rows(
            ["Notes", "CustomerID"],
            vec![vec![t("vip"), Value::Int(1)]],
        );
        let outcome = EntityPipeline::for_entity(Entity::Customer).run(raw, &ctx());

        assert_eq!(outcome.dataset.columns().last().unwrap(), "Notes");
        assert_eq!(outcome.dataset.value(0, "Notes").unwrap(), &t("vip"));
    }

    fn from_csv(raw: &str) -> Dataset {
        CsvStore::new().parse(raw.as_bytes()).unwrap()
    }

    const RAW_PRODUCTS: &str = "\
product_id,product_name,unit_price,discount_percent
A-1,Widget,10,0
0042,1e5,$5.50,
42,Gizmo,7,5%
12345678901234567891,Big1,1,0
12345678901234567892,Big2,1,0
";

    #[test]
    fn test_text_keys_and_names_keep_their_spelling() {
        let outcome = EntityPipeline::for_entity(Entity::Product).run(from_csv(RAW_PRODUCTS), &ctx());
        let ds = &outcome.dataset;

        let keys: Vec<String> = ds.column_values("ProductID").iter().map(|v| v.to_string()).collect();
        assert_eq!(
            keys,
            ["A-1", "0042", "42", "12345678901234567891", "12345678901234567892"]
        );
        assert_eq!(ds.value(1, "ProductName").unwrap(), &t("1e5"));
        assert_eq!(ds.value(1, "UnitPrice").unwrap(), &Value::Float(5.5));
        assert_eq!(ds.value(2, "ProductDiscountPercent").unwrap(), &Value::Float(5.0));
        assert_eq!(outcome.report.rows_removed(), 0);
    }

    #[test]
    fn test_negative_product_discount_dropped() {
        let raw = "ProductID,UnitPrice,ProductDiscountPercent\n1,10,-5\n2,10,15\n";
        let outcome = EntityPipeline::for_entity(Entity::Product).run(from_csv(raw), &ctx());

        assert_eq!(outcome.dataset.len(), 1);
        assert_eq!(outcome.dataset.value(0, "ProductID").unwrap(), &t("2"));
        assert_eq!(outcome.report.removed_by("drop_invalid"), 1);
    }

    #[test]
    fn test_rerun_over_written_file_is_stable() {
        let store = CsvStore::new();
        let inputs = [
            (Entity::Product, RAW_PRODUCTS.to_string()),
            (
                Entity::Customer,
                "cust_id,customer_name,JoinDate,RewardPoints,Notes\n\
                 0007,Ann,2024-01-02 10:30:00.250,12.9,vip\n\
                 7,,not-a-date,,\n"
                    .to_string(),
            ),
            (
                Entity::Sale,
                "TransactionID,SaleDate,CustomerID,SaleAmount,DiscountPercent,payment_type\n\
                 0550,01/06/2024,1001,$39.99,10%,creditcard\n\
                 551,,,12,0,Bitcoin\n"
                    .to_string(),
            ),
        ];

        for (entity, raw) in inputs {
            let pipeline = EntityPipeline::for_entity(entity);
            let once = pipeline.run(from_csv(&raw), &ctx());
            let written = store.render(&once.dataset).unwrap();
            let reread = store.parse(written.as_slice()).unwrap();
            let twice = pipeline.run(reread, &ctx());

            assert_eq!(once.dataset, twice.dataset, "{} changed on rerun", entity);
            assert_eq!(twice.report.rows_removed(), 0);
        }
    }
}
