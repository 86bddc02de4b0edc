// smartstore/src/commands/run.rs
//
// USE CASE: Prepare then load, in one go.

use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use smartstore_core::application::run_prepare;
use smartstore_core::domain::entity::CleaningContext;
use smartstore_core::infrastructure::tabular::CsvStore;

pub async fn execute(project_dir: PathBuf, today: Option<NaiveDate>) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let config = super::load_config(&project_dir)?;
    let ctx = CleaningContext::new(today.unwrap_or_else(|| Local::now().date_naive()));

    if let Err(e) = run_prepare(&CsvStore::new(), &project_dir, &config, &ctx) {
        eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = super::load::load(&project_dir, &config).await {
        eprintln!("\n💥 CRITICAL PIPELINE ERROR: {:#}", e);
        std::process::exit(1);
    }

    println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
    Ok(())
}
