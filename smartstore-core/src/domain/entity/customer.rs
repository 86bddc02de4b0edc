// smartstore-core/src/domain/entity/customer.rs

use super::{Entity, EntityPipeline};
use crate::domain::cleaning::{ColumnKind, ColumnRule, Validity};

pub const KEY: &str = "CustomerID";

pub fn pipeline() -> EntityPipeline {
    EntityPipeline::new(
        Entity::Customer,
        KEY,
        vec![
            ColumnRule::key(KEY).aliases(&["cust_id", "customer_id", "id"]),
            ColumnRule::new("Name", ColumnKind::Text)
                .aliases(&["customer_name", "CustomerName", "name"])
                .default_value("Unknown Customer"),
            ColumnRule::new("Region", ColumnKind::Text)
                .aliases(&["region"])
                .default_value("Unknown"),
            ColumnRule::new("JoinDate", ColumnKind::Date)
                .aliases(&["join_date"])
                .default_today(),
            ColumnRule::new("CustomerRewardPoints", ColumnKind::Integer)
                .aliases(&["reward_points", "RewardPoints"])
                .default_value(0i64)
                .validity(Validity::AtLeast(0.0)),
            ColumnRule::new("CustomerStatus", ColumnKind::Text)
                .aliases(&["status"])
                .default_value("New"),
        ],
    )
}
