// smartstore-core/src/domain/entity/mod.rs

pub mod customer;
pub mod pipeline;
pub mod product;
pub mod sale;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

pub use pipeline::{CATCH_ALL, CleaningContext, CleaningOutcome, EntityPipeline};

/// The three record families handled by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Customer,
    Product,
    Sale,
}

impl Entity {
    pub const ALL: [Entity; 3] = [Entity::Customer, Entity::Product, Entity::Sale];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Product => "product",
            Self::Sale => "sale",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" | "customers" => Ok(Self::Customer),
            "product" | "products" => Ok(Self::Product),
            "sale" | "sales" => Ok(Self::Sale),
            _ => Err(DomainError::UnknownEntity(s.to_string())),
        }
    }
}
