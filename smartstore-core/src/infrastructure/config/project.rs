// smartstore-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

const CANDIDATES: [&str; 2] = ["smartstore.yaml", "smartstore_project.yaml"];

// --- LOADER ---

#[instrument(skip(project_dir))] // Log automatique de l'entrée/sortie de la fonction
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Découverte du fichier principal
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project manifest");

    // 2. Chargement YAML
    let content = fs::read_to_string(&config_path).map_err(|e| {
        InfrastructureError::ConfigError(format!(
            "Failed to read project config at {:?}: {}",
            config_path, e
        ))
    })?;
    let mut config: ProjectConfig = serde_yaml::from_str(&content)?;

    // 3. Override via Variables d'Environnement
    // Permet de faire: SMARTSTORE_WAREHOUSE_PATH=/tmp/dw.duckdb smartstore load
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    config.validate()?;
    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CANDIDATES
    )))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn apply_env_overrides<F>(config: &mut ProjectConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = env("SMARTSTORE_WAREHOUSE_PATH") {
        info!(old = ?config.warehouse_path, new = ?val, "Overriding warehouse path via ENV");
        config.warehouse_path = val;
    }
    if let Some(val) = env("SMARTSTORE_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Some(val) = env("SMARTSTORE_STRICT") {
        let strict = is_truthy(&val);
        info!(old = config.strict_inputs, new = strict, "Overriding strict inputs via ENV");
        config.strict_inputs = strict;
    }
}
