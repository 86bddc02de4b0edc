// smartstore-core/src/domain/warehouse/mod.rs
//
// Relational target of the load: table layouts and the final projection of
// cleaned records onto typed warehouse rows.

pub mod projection;
pub mod schema;

pub use projection::{Projection, SqlValue, project};
pub use schema::{DELETE_ORDER, INSERT_ORDER, SqlType, TableSchema, WarehouseColumn};
