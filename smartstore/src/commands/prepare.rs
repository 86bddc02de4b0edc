// smartstore/src/commands/prepare.rs
//
// USE CASE: Clean the raw files into prepared files.

use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use smartstore_core::application::run_prepare;
use smartstore_core::domain::entity::CleaningContext;
use smartstore_core::infrastructure::tabular::CsvStore;

pub fn execute(project_dir: PathBuf, today: Option<NaiveDate>) -> anyhow::Result<()> {
    let config = super::load_config(&project_dir)?;
    let ctx = CleaningContext::new(today.unwrap_or_else(|| Local::now().date_naive()));

    run_prepare(&CsvStore::new(), &project_dir, &config, &ctx)?;
    Ok(())
}
