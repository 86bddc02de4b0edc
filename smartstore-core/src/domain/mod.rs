pub mod cleaning;
pub mod dataset;
pub mod entity;
pub mod error;
pub mod project;
pub mod warehouse;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use dataset::{Dataset, SourceRead, Value};
pub use entity::Entity;
pub use error::DomainError;
