// smartstore-core/src/ports/mod.rs

pub mod tabular;
pub mod warehouse;

pub use tabular::TabularStore;
pub use warehouse::Warehouse;
