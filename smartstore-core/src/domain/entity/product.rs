// smartstore-core/src/domain/entity/product.rs

use super::{Entity, EntityPipeline};
use crate::domain::cleaning::{ColumnKind, ColumnRule, Validity};

pub const KEY: &str = "ProductID";

pub fn pipeline() -> EntityPipeline {
    EntityPipeline::new(
        Entity::Product,
        KEY,
        vec![
            ColumnRule::key(KEY).aliases(&["product_id", "id"]),
            ColumnRule::new("ProductName", ColumnKind::Text)
                .aliases(&["product_name"])
                .default_value("Unknown"),
            ColumnRule::new("Category", ColumnKind::Text)
                .aliases(&["category"])
                .default_value("Unknown"),
            ColumnRule::new("UnitPrice", ColumnKind::Float)
                .aliases(&["unit_price"])
                .default_value(0.0)
                .validity(Validity::AtLeast(0.0)),
            ColumnRule::new("ProductDiscountPercent", ColumnKind::Float)
                .aliases(&["discount_percent", "product_discount_percent"])
                .default_value(0.0)
                .validity(Validity::AtLeast(0.0)),
            ColumnRule::new("ProductSupplierRegion", ColumnKind::Text)
                .aliases(&["supplier_region"])
                .default_value("Unknown"),
        ],
    )
}
