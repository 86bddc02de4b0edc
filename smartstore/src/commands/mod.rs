// smartstore/src/commands/mod.rs

pub mod clean;
pub mod inspect;
pub mod load;
pub mod prepare;
pub mod run;
pub mod scrub;

use anyhow::Context;
use std::path::Path;

use smartstore_core::infrastructure::config::{ProjectConfig, load_project_config};

pub(crate) fn load_config(project_dir: &Path) -> anyhow::Result<ProjectConfig> {
    println!("⚙️  Loading configuration...");
    let config = load_project_config(project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {} (v{})", config.name, config.version);
    Ok(config)
}
