// smartstore-core/src/infrastructure/tabular.rs

use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::domain::dataset::{Dataset, SourceRead, Value};
use crate::error::SmartStoreError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;
use crate::ports::tabular::TabularStore;

/// Comma separated files with a header row.
#[derive(Debug, Clone, Copy)]
pub struct CsvStore {
    delimiter: u8,
}

impl Default for CsvStore {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a header row then data rows as text cells. Ragged rows are
    /// padded with missing cells or truncated; bytes that are not UTF-8 are
    /// replaced.
    pub fn parse<R: Read>(&self, reader: R) -> Result<Dataset, InfrastructureError> {
        // `flexible` keeps short and long rows instead of failing on them.
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .byte_headers()?
            .iter()
            .map(|h| {
                String::from_utf8_lossy(h)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_string()
            })
            .collect();
        let mut dataset = Dataset::new(headers);

        for record in rdr.byte_records() {
            let record = record?;
            let row = record
                .iter()
                .map(|field| Value::from_raw(&String::from_utf8_lossy(field)))
                .collect();
            dataset.push_row(row);
        }
        Ok(dataset)
    }

    pub fn render(&self, dataset: &Dataset) -> Result<Vec<u8>, InfrastructureError> {
        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());
        wtr.write_record(dataset.columns())?;
        for row in dataset.rows() {
            wtr.write_record(row.iter().map(|v| v.to_string()))?;
        }
        wtr.into_inner()
            .map_err(|e| InfrastructureError::Io(e.into_error()))
    }
}

impl TabularStore for CsvStore {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn read(&self, path: &Path) -> SourceRead {
        if !path.exists() {
            warn!("input file not found");
            return SourceRead::Missing {
                path: path.to_path_buf(),
            };
        }
        let parsed = File::open(path)
            .map_err(InfrastructureError::Io)
            .and_then(|file| self.parse(file));
        match parsed {
            Ok(dataset) => {
                info!(
                    rows = dataset.len(),
                    columns = dataset.columns().len(),
                    "input loaded"
                );
                SourceRead::Loaded(dataset)
            }
            Err(e) => {
                warn!(error = %e, "input unreadable");
                SourceRead::Unreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        }
    }

    #[instrument(skip(self, dataset), fields(path = %path.display(), rows = dataset.len()))]
    fn write(&self, path: &Path, dataset: &Dataset) -> Result<(), SmartStoreError> {
        let bytes = self.render(dataset)?;
        atomic_write(path, bytes)?;
        debug!("dataset written");
        Ok(())
    }
}
