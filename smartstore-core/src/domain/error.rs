// smartstore-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Unknown entity '{0}'")]
    #[diagnostic(
        code(smartstore::domain::entity),
        help("Expected one of: customer, product, sale.")
    )]
    UnknownEntity(String),
}
