// smartstore-core/src/application/prepare.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

use crate::application::inputs::{InputStatus, read_input};
use crate::domain::cleaning::CleaningReport;
use crate::domain::entity::{CleaningContext, Entity, EntityPipeline};
use crate::domain::project::ProjectConfig;
use crate::error::SmartStoreError;
use crate::infrastructure::fs::save_json;
use crate::ports::tabular::TabularStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPrepared {
    pub entity: Entity,
    pub input: String,
    pub input_status: InputStatus,
    pub output: String,
    pub report: CleaningReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareResult {
    pub success: bool,
    pub today: NaiveDate,
    pub entities: Vec<EntityPrepared>,
}

impl PrepareResult {
    pub fn entity(&self, entity: Entity) -> Option<&EntityPrepared> {
        self.entities.iter().find(|e| e.entity == entity)
    }
}

/// Cleans the raw file of every entity into its prepared file and writes
/// `prepare_results.json` to the target directory.
#[instrument(skip(store, config, ctx), fields(today = %ctx.today))]
pub fn run_prepare<S: TabularStore>(
    store: &S,
    project_dir: &Path,
    config: &ProjectConfig,
    ctx: &CleaningContext,
) -> Result<PrepareResult, SmartStoreError> {
    println!("🧽 Preparing raw data...");
    let start_time = std::time::Instant::now();

    let mut entities = Vec::with_capacity(Entity::ALL.len());
    for entity in Entity::ALL {
        let input = config.raw_path(project_dir, entity);
        let output = config.prepared_path(project_dir, entity);

        let (raw, input_status) = read_input(store, entity, &input, config.strict_inputs)?;
        let outcome = EntityPipeline::for_entity(entity).run(raw, ctx);
        store.write(&output, &outcome.dataset)?;

        let report = outcome.report;
        println!(
            "   ✅ {:<8} {} → {} rows ({} removed)",
            entity,
            report.rows_in,
            report.rows_out,
            report.rows_removed()
        );
        entities.push(EntityPrepared {
            entity,
            input: input.display().to_string(),
            input_status,
            output: output.display().to_string(),
            report,
        });
    }

    let result = PrepareResult {
        success: true,
        today: ctx.today,
        entities,
    };
    save_json(
        &config.target_dir(project_dir).join("prepare_results.json"),
        &result,
    )?;

    info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "prepare finished");
    println!(
        "✨ Prepared {} entities in {:.2}s.",
        result.entities.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(result)
}
