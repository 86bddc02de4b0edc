// smartstore-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contracts for tabular storage and the warehouse.
pub mod ports;

// 2. Domain
// Dataset model, cleaning engine, entity rules, warehouse schema.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// CSV files, DuckDB, YAML configuration.
pub mod infrastructure;

// 4. Application (Use Cases)
// Prepare, Load, Scrub, Clean.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::SmartStoreError;
