// smartstore-core/src/domain/warehouse/schema.rs

use std::fmt;

use crate::domain::entity::Entity;

/// Storage types used by the warehouse tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    BigInt,
    Double,
    Varchar,
}

impl SqlType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::BigInt => "BIGINT",
            SqlType::Double => "DOUBLE",
            SqlType::Varchar => "VARCHAR",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One warehouse column and the cleaned column it is loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarehouseColumn {
    pub name: &'static str,
    pub source: &'static str,
    pub sql_type: SqlType,
    /// A row whose value here cannot be coerced is not loaded.
    pub required: bool,
}

const fn col(name: &'static str, source: &'static str, sql_type: SqlType, required: bool) -> WarehouseColumn {
    WarehouseColumn {
        name,
        source,
        sql_type,
        required,
    }
}

const CUSTOMER_COLUMNS: [WarehouseColumn; 6] = [
    col("customer_id", "CustomerID", SqlType::BigInt, true),
    col("name", "Name", SqlType::Varchar, false),
    col("region", "Region", SqlType::Varchar, false),
    col("join_date", "JoinDate", SqlType::Varchar, false),
    col("reward_points", "CustomerRewardPoints", SqlType::BigInt, false),
    col("status", "CustomerStatus", SqlType::Varchar, false),
];

const PRODUCT_COLUMNS: [WarehouseColumn; 6] = [
    col("product_id", "ProductID", SqlType::BigInt, true),
    col("product_name", "ProductName", SqlType::Varchar, false),
    col("category", "Category", SqlType::Varchar, false),
    col("unit_price", "UnitPrice", SqlType::Double, true),
    col("product_discount_percent", "ProductDiscountPercent", SqlType::Double, true),
    col("supplier_region", "ProductSupplierRegion", SqlType::Varchar, false),
];

const SALES_COLUMNS: [WarehouseColumn; 9] = [
    col("transaction_id", "TransactionID", SqlType::BigInt, true),
    col("sale_date", "SaleDate", SqlType::Varchar, false),
    col("customer_id", "CustomerID", SqlType::BigInt, true),
    col("product_id", "ProductID", SqlType::BigInt, true),
    col("store_id", "StoreID", SqlType::BigInt, false),
    col("campaign_id", "CampaignID", SqlType::BigInt, false),
    col("sale_amount", "SaleAmount", SqlType::Double, true),
    col("discount_percent", "DiscountPercent", SqlType::Double, false),
    col("sale_payment_type", "SalePaymentType", SqlType::Varchar, false),
];

/// Sales reference customers and products, so they are emptied first.
pub const DELETE_ORDER: [Entity; 3] = [Entity::Sale, Entity::Product, Entity::Customer];

pub const INSERT_ORDER: [Entity; 3] = [Entity::Customer, Entity::Product, Entity::Sale];

#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub table: &'static str,
    pub entity: Entity,
    /// Primary key, always the first column.
    pub key: &'static str,
    pub columns: &'static [WarehouseColumn],
}

impl TableSchema {
    pub fn for_entity(entity: Entity) -> Self {
        match entity {
            Entity::Customer => Self {
                table: "customer",
                entity,
                key: "customer_id",
                columns: &CUSTOMER_COLUMNS,
            },
            Entity::Product => Self {
                table: "product",
                entity,
                key: "product_id",
                columns: &PRODUCT_COLUMNS,
            },
            Entity::Sale => Self {
                table: "sales",
                entity,
                key: "transaction_id",
                columns: &SALES_COLUMNS,
            },
        }
    }

    pub fn all() -> [TableSchema; 3] {
        INSERT_ORDER.map(Self::for_entity)
    }

    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                if c.name == self.key {
                    format!("{} {} PRIMARY KEY", c.name, c.sql_type)
                } else {
                    format!("{} {}", c.name, c.sql_type)
                }
            })
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.table,
            columns.join(", ")
        )
    }

    pub fn delete_sql(&self) -> String {
        format!("DELETE FROM {}", self.table)
    }

    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {}", self.table)
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }
}
