// smartstore-core/src/domain/dataset/source.rs

use std::path::PathBuf;

use super::Dataset;

/// Outcome of reading one input source.
///
/// Keeps "read fine but empty" apart from "could not read", so the caller
/// picks between continuing with an empty dataset and aborting the run.
#[derive(Debug)]
pub enum SourceRead {
    Loaded(Dataset),
    Missing { path: PathBuf },
    Unreadable { path: PathBuf, reason: String },
}

impl SourceRead {
    pub fn into_dataset(self) -> Option<Dataset> {
        match self {
            SourceRead::Loaded(dataset) => Some(dataset),
            _ => None,
        }
    }

    /// Human readable reason for a failed read, `None` when loaded.
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            SourceRead::Loaded(_) => None,
            SourceRead::Missing { path } => Some(format!("file not found: {}", path.display())),
            SourceRead::Unreadable { path, reason } => {
                Some(format!("cannot read {}: {}", path.display(), reason))
            }
        }
    }
}
