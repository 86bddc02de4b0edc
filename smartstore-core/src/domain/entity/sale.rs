// smartstore-core/src/domain/entity/sale.rs

use super::{CATCH_ALL, Entity, EntityPipeline};
use crate::domain::cleaning::{ColumnKind, ColumnRule, Validity};

pub const KEY: &str = "TransactionID";

pub const PAYMENT_TYPES: [&str; 4] = ["DebitCard", "CreditCard", "Cash", "GiftCard"];

pub fn pipeline() -> EntityPipeline {
    EntityPipeline::new(
        Entity::Sale,
        KEY,
        vec![
            ColumnRule::key(KEY).aliases(&["transaction_id"]),
            ColumnRule::new("SaleDate", ColumnKind::Date)
                .aliases(&["sale_date"])
                .default_today(),
            ColumnRule::new("CustomerID", ColumnKind::Text)
                .aliases(&["customer_id"])
                .default_value(0i64),
            ColumnRule::new("ProductID", ColumnKind::Text)
                .aliases(&["product_id"])
                .default_value(0i64),
            ColumnRule::new("StoreID", ColumnKind::Text)
                .aliases(&["store_id"])
                .default_value(0i64),
            ColumnRule::new("CampaignID", ColumnKind::Integer)
                .aliases(&["campaign_id"])
                .default_value(0i64),
            ColumnRule::new("SaleAmount", ColumnKind::Float)
                .aliases(&["sale_amount"])
                .validity(Validity::AtLeast(0.0)),
            ColumnRule::new("DiscountPercent", ColumnKind::Float)
                .aliases(&["discount_percent"])
                .validity(Validity::Within {
                    min: 0.0,
                    max: 100.0,
                }),
            ColumnRule::new("SalePaymentType", ColumnKind::Text)
                .aliases(&["payment_type", "sale_payment_type"])
                .default_value(CATCH_ALL)
                .allowed(&PAYMENT_TYPES),
        ],
    )
}
