// smartstore-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::domain::entity::Entity;

/// Project manifest (`smartstore.yaml`). Relative paths are resolved against
/// the project directory.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProjectConfig {
    #[validate(length(min = 1, message = "Project name cannot be empty"))]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[validate(length(min = 1, message = "raw-dir cannot be empty"))]
    #[serde(rename = "raw-dir", default = "default_raw_dir")]
    pub raw_dir: String,

    #[validate(length(min = 1, message = "prepared-dir cannot be empty"))]
    #[serde(rename = "prepared-dir", default = "default_prepared_dir")]
    pub prepared_dir: String,

    #[validate(length(min = 1, message = "warehouse-path cannot be empty"))]
    #[serde(rename = "warehouse-path", default = "default_warehouse_path")]
    pub warehouse_path: String,

    #[validate(length(min = 1, message = "target-path cannot be empty"))]
    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    #[serde(rename = "clean-targets", default = "default_clean_targets")]
    pub clean_targets: Vec<String>,

    /// Abort instead of continuing with an empty batch when an input is
    /// missing or unreadable.
    #[serde(rename = "strict-inputs", default)]
    pub strict_inputs: bool,

    #[validate(nested)]
    #[serde(default)]
    pub sources: SourceFiles,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct SourceFiles {
    #[validate(nested)]
    #[serde(default = "default_customer_files")]
    pub customers: EntityFiles,

    #[validate(nested)]
    #[serde(default = "default_product_files")]
    pub products: EntityFiles,

    #[validate(nested)]
    #[serde(default = "default_sale_files")]
    pub sales: EntityFiles,
}

/// File names of one entity, relative to `raw-dir` / `prepared-dir`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
pub struct EntityFiles {
    #[validate(length(min = 1, message = "raw file name cannot be empty"))]
    pub raw: String,
    #[validate(length(min = 1, message = "prepared file name cannot be empty"))]
    pub prepared: String,
}

impl EntityFiles {
    fn named(stem: &str) -> Self {
        Self {
            raw: format!("{}_data.csv", stem),
            prepared: format!("{}_data_prepared.csv", stem),
        }
    }
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            customers: default_customer_files(),
            products: default_product_files(),
            sales: default_sale_files(),
        }
    }
}

impl SourceFiles {
    pub fn for_entity(&self, entity: Entity) -> &EntityFiles {
        match entity {
            Entity::Customer => &self.customers,
            Entity::Product => &self.products,
            Entity::Sale => &self.sales,
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "smartstore".to_string(),
            version: default_version(),
            raw_dir: default_raw_dir(),
            prepared_dir: default_prepared_dir(),
            warehouse_path: default_warehouse_path(),
            target_path: default_target_path(),
            clean_targets: default_clean_targets(),
            strict_inputs: false,
            sources: SourceFiles::default(),
        }
    }
}

impl ProjectConfig {
    pub fn raw_path(&self, project_dir: &Path, entity: Entity) -> PathBuf {
        project_dir
            .join(&self.raw_dir)
            .join(&self.sources.for_entity(entity).raw)
    }

    pub fn prepared_path(&self, project_dir: &Path, entity: Entity) -> PathBuf {
        project_dir
            .join(&self.prepared_dir)
            .join(&self.sources.for_entity(entity).prepared)
    }

    pub fn warehouse_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.warehouse_path)
    }

    pub fn target_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.target_path)
    }
}

fn default_customer_files() -> EntityFiles {
    EntityFiles::named("customers")
}
fn default_product_files() -> EntityFiles {
    EntityFiles::named("products")
}
fn default_sale_files() -> EntityFiles {
    EntityFiles::named("sales")
}
fn default_version() -> String {
    "1.0.0".to_string()
}
fn default_raw_dir() -> String {
    "data/raw".to_string()
}
fn default_prepared_dir() -> String {
    "data/prepared".to_string()
}
fn default_warehouse_path() -> String {
    "data/dw/smart_store_dw.duckdb".to_string()
}
fn default_target_path() -> String {
    "target".to_string()
}
fn default_clean_targets() -> Vec<String> {
    vec!["target".to_string(), "data/prepared".to_string()]
}
