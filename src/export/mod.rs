//! Export module for BudgetWise
//!
//! - CSV: the income/expense/budget report
//! - JSON and YAML: full session snapshots that can seed a new session

pub mod csv;
pub mod json;
pub mod yaml;

use std::path::Path;

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::store::SeedData;

pub use csv::{report_filename, write_report_csv};
pub use json::{export_session_json, import_from_json, SessionExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_session_yaml, import_from_yaml};

const SCHEMA_VERSION_KEY: &str = "schema_version";

/// Load a seed file
///
/// `.yaml`/`.yml` files are read as YAML, everything else as JSON. Full
/// snapshots and bare seed documents (only the collections) are both accepted;
/// a top-level `schema_version` key marks a snapshot.
pub fn load_seed_file(path: &Path) -> BudgetwiseResult<SeedData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| BudgetwiseError::Import(format!("Failed to read {}: {}", path.display(), e)))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let seed = if is_yaml {
        let value: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| BudgetwiseError::Import(e.to_string()))?;
        if value.get(SCHEMA_VERSION_KEY).is_some() {
            import_from_yaml(&content)?.into_seed()
        } else {
            serde_yaml::from_value::<SeedData>(value)
                .map_err(|e| BudgetwiseError::Import(e.to_string()))?
        }
    } else {
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| BudgetwiseError::Import(e.to_string()))?;
        if value.get(SCHEMA_VERSION_KEY).is_some() {
            import_from_json(&content)?.into_seed()
        } else {
            serde_json::from_value::<SeedData>(value)
                .map_err(|e| BudgetwiseError::Import(e.to_string()))?
        }
    };

    seed.validate()?;
    Ok(seed)
}
