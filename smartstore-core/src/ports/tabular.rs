// smartstore-core/src/ports/tabular.rs

use std::path::Path;

use crate::domain::dataset::{Dataset, SourceRead};
use crate::error::SmartStoreError;

/// Persistence of datasets as delimited files.
pub trait TabularStore {
    /// Never fails: an absent or unreadable file is reported in the
    /// returned [`SourceRead`].
    fn read(&self, path: &Path) -> SourceRead;

    fn write(&self, path: &Path, dataset: &Dataset) -> Result<(), SmartStoreError>;
}
