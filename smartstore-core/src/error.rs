// smartstore-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmartStoreError {
    // --- ERREURS DU DOMAINE (Entities, Schema) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, CSV, DuckDB, Config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ERREURS APPLICATIVES ---
    #[error("Input for '{entity}' is unavailable at {path}: {reason}")]
    MissingInput {
        entity: String,
        path: String,
        reason: String,
    },

    #[error("Warehouse load failed on table '{table}': {reason}")]
    LoadFailure { table: String, reason: String },

    #[error("Internal Error: {0}")]
    InternalError(String),

    #[error("Unsafe path traversal detected: {0}")]
    UnsafePath(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for SmartStoreError {
    fn from(err: std::io::Error) -> Self {
        SmartStoreError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for SmartStoreError {
    fn from(err: duckdb::Error) -> Self {
        SmartStoreError::Infrastructure(InfrastructureError::from(err))
    }
}
