// smartstore-core/src/domain/cleaning/report.rs

use serde::{Deserialize, Serialize};

/// What one cleaning step did to the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCount {
    pub step: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub rows_removed: usize,
    pub cells_changed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub entity: String,
    pub rows_in: usize,
    pub rows_out: usize,
    pub steps: Vec<StepCount>,
}

impl CleaningReport {
    pub fn rows_removed(&self) -> usize {
        self.steps.iter().map(|s| s.rows_removed).sum()
    }

    pub fn cells_changed(&self) -> usize {
        self.steps.iter().map(|s| s.cells_changed).sum()
    }

    /// Rows removed by every step whose name starts with `prefix`.
    pub fn removed_by(&self, prefix: &str) -> usize {
        self.steps
            .iter()
            .filter(|s| s.step.starts_with(prefix))
            .map(|s| s.rows_removed)
            .sum()
    }
}
