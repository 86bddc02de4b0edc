// smartstore-core/src/application/clean.rs

use std::fs;
use std::path::{Component, Path};

use crate::error::SmartStoreError;
use crate::infrastructure::config::project::load_project_config;

/// Removes the generated artifacts listed in `clean-targets`.
pub fn clean_project(project_dir: &Path) -> Result<Vec<String>, SmartStoreError> {
    tracing::info!("🧹 Initializing SmartStore cleanup sequence...");

    let config = load_project_config(project_dir)?;

    let targets = if config.clean_targets.is_empty() {
        vec![config.target_path.clone()]
    } else {
        config.clean_targets
    };

    let mut removed = Vec::new();
    for target_rel_path in targets {
        // Zero-Trust Path Traversal Guard
        let rel = Path::new(&target_rel_path);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || rel.as_os_str().is_empty() {
            return Err(SmartStoreError::UnsafePath(target_rel_path));
        }

        let full_path = project_dir.join(rel);
        if full_path.exists() {
            if full_path.is_dir() {
                fs::remove_dir_all(&full_path)?;
            } else {
                fs::remove_file(&full_path)?;
            }
            println!("   🗑️  Artifact removed: {}", target_rel_path);
            removed.push(target_rel_path);
        }
    }

    Ok(removed)
}
