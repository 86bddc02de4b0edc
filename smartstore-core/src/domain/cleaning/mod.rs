// smartstore-core/src/domain/cleaning/mod.rs
//
// Entity-agnostic column transforms. Nothing here rejects data on its own:
// values that cannot be cleaned are flagged (Null / Invalid) and the entity
// rules decide what to do with them.

pub mod dates;
pub mod numeric;
pub mod report;
pub mod rules;
pub mod scrubber;

pub use report::{CleaningReport, StepCount};
pub use rules::{ColumnKind, ColumnRule, DefaultFill, Validity};
pub use scrubber::{FillSpec, STANDARD_DATETIME, Scrubber};
