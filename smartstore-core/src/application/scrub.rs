// smartstore-core/src/application/scrub.rs

use std::path::Path;
use tracing::instrument;

use crate::domain::cleaning::{Scrubber, StepCount};
use crate::domain::dataset::SourceRead;
use crate::error::SmartStoreError;
use crate::ports::tabular::TabularStore;

/// Generic cleaning profile for a single file, independent of any entity.
#[derive(Debug, Clone, Default)]
pub struct ScrubOptions {
    /// Replacement for every missing cell.
    pub fill: Option<String>,
    pub dedupe: bool,
    pub normalize_text: bool,
    pub renames: Vec<(String, String)>,
    /// Parsed into `StandardDateTime`.
    pub date_column: Option<String>,
}

#[instrument(skip(store, options), fields(input = %input.display(), output = %output.display()))]
pub fn scrub_file<S: TabularStore>(
    store: &S,
    input: &Path,
    output: &Path,
    options: &ScrubOptions,
) -> Result<Vec<StepCount>, SmartStoreError> {
    let read = store.read(input);
    if let Some(reason) = read.failure_reason() {
        return Err(SmartStoreError::MissingInput {
            entity: "scrub".to_string(),
            path: input.display().to_string(),
            reason,
        });
    }
    let SourceRead::Loaded(dataset) = read else {
        return Err(SmartStoreError::InternalError("unexpected source state".into()));
    };

    let mut scrubber = Scrubber::new(dataset);
    if let Some(fill) = &options.fill {
        scrubber.fill_missing(fill.as_str());
    }
    if options.dedupe {
        scrubber.deduplicate();
    }
    if options.normalize_text {
        scrubber.normalize_all_text();
    }
    if !options.renames.is_empty() {
        scrubber.rename_columns(options.renames.iter().map(|(k, v)| (k, v)));
    }
    if let Some(column) = &options.date_column {
        scrubber.parse_date(column);
    }

    let (dataset, steps) = scrubber.into_parts();
    store.write(output, &dataset)?;
    Ok(steps)
}
