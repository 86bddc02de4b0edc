// smartstore-core/src/application/inputs.rs

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::domain::dataset::{Dataset, SourceRead};
use crate::domain::entity::Entity;
use crate::error::SmartStoreError;
use crate::ports::tabular::TabularStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputStatus {
    Loaded,
    Missing,
    Unreadable,
}

/// Reads the input of one entity.
///
/// An absent or unreadable file yields an empty dataset and a warning, or
/// `MissingInput` when `strict` is set.
pub fn read_input<S: TabularStore>(
    store: &S,
    entity: Entity,
    path: &Path,
    strict: bool,
) -> Result<(Dataset, InputStatus), SmartStoreError> {
    let read = store.read(path);
    let status = match &read {
        SourceRead::Loaded(_) => InputStatus::Loaded,
        SourceRead::Missing { .. } => InputStatus::Missing,
        SourceRead::Unreadable { .. } => InputStatus::Unreadable,
    };
    if let Some(reason) = read.failure_reason() {
        if strict {
            return Err(SmartStoreError::MissingInput {
                entity: entity.to_string(),
                path: path.display().to_string(),
                reason,
            });
        }
        warn!(%entity, %reason, "input unavailable, continuing with an empty batch");
        println!("   ⚠️  {}: {} (continuing with no rows)", entity, reason);
    }
    Ok((read.into_dataset().unwrap_or_default(), status))
}
