// smartstore/src/commands/scrub.rs
//
// USE CASE: Generic cleaning pass over one file.

use std::path::PathBuf;

use smartstore_core::application::{ScrubOptions, scrub_file};
use smartstore_core::infrastructure::tabular::CsvStore;

pub fn execute(input: PathBuf, output: PathBuf, options: ScrubOptions) -> anyhow::Result<()> {
    println!("🧼 Scrubbing {}...", input.display());
    let steps = scrub_file(&CsvStore::new(), &input, &output, &options)?;

    for step in &steps {
        println!(
            "   • {:<16} {:>5} rows removed, {:>5} cells changed",
            step.step, step.rows_removed, step.cells_changed
        );
    }
    println!("✨ Written to {}", output.display());
    Ok(())
}
