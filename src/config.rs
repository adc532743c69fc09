use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DashboardError, DashboardResult};
use crate::predict::artifacts::ArtifactPaths;

/// Name of the optional configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// File locations for the dataset and the prediction artifacts.
///
/// Every field has a default, so a partial `dashboard.json` only overrides
/// what it names:
///
/// ```json
/// { "dataset_path": "data/customers.parquet", "artifact_dir": "models" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    pub artifact_dir: PathBuf,
    pub model_file: String,
    pub gender_encoder_file: String,
    pub membership_encoder_file: String,
    pub satisfaction_encoder_file: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("E-commerce-Customer-Behavior.csv"),
            artifact_dir: PathBuf::from("."),
            model_file: "satisfied_model.json".into(),
            gender_encoder_file: "gender_encoder.json".into(),
            membership_encoder_file: "membership_encoder.json".into(),
            satisfaction_encoder_file: "satisfaction_encoder.json".into(),
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, defaults otherwise. A file that exists but
    /// does not parse is an error rather than a silent fallback.
    pub fn load(path: &Path) -> DashboardResult<Self> {
        if !path.exists() {
            log::debug!("no {} found, using default locations", path.display());
            return Ok(Self::default());
        }
        let invalid = |reason: String| DashboardError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config: Self = serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))?;
        log::info!("Using configuration from {}", path.display());
        Ok(config)
    }

    /// Full paths of the four artifacts.
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.artifact_dir.join(&self.model_file),
            gender_encoder: self.artifact_dir.join(&self.gender_encoder_file),
            membership_encoder: self.artifact_dir.join(&self.membership_encoder_file),
            satisfaction_encoder: self.artifact_dir.join(&self.satisfaction_encoder_file),
        }
    }
}
