// smartstore-core/src/domain/dataset/mod.rs
//
// In-memory tabular model shared by every stage of the pipeline.

pub mod source;
pub mod table;
pub mod value;

pub use source::SourceRead;
pub use table::Dataset;
pub use value::Value;
