// smartstore-core/src/application/mod.rs

pub mod clean;
pub mod inputs;
pub mod load;
pub mod prepare;
pub mod scrub;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use smartstore_core::application::{run_prepare, run_load, clean_project};`

pub use clean::clean_project;
pub use inputs::{InputStatus, read_input};
pub use load::{LoadReport, TableLoad, WarehouseBatch, WarehouseLoader, run_load};
pub use prepare::{EntityPrepared, PrepareResult, run_prepare};
pub use scrub::{ScrubOptions, scrub_file};
