use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::classifier::{Classifier, ModelArtifact};
use super::encoder::{CategoryEncoder, EncoderArtifact};
use super::features::SATISFACTION_FEATURES;
use crate::error::{DashboardError, DashboardResult};

// ---------------------------------------------------------------------------
// Locations and failure reasons
// ---------------------------------------------------------------------------

/// Where the four artifacts live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub gender_encoder: PathBuf,
    pub membership_encoder: PathBuf,
    pub satisfaction_encoder: PathBuf,
}

/// Why the bundle could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The file is not there.
    Missing { path: PathBuf },
    /// The file exists but could not be read or deserialized, or its
    /// contents are structurally invalid.
    Corrupt { path: PathBuf, detail: String },
    /// The model was trained on a different feature order.
    SchemaMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::Missing { path } => write!(f, "{} not found", path.display()),
            UnavailableReason::Corrupt { path, detail } => {
                write!(f, "{} is corrupt: {detail}", path.display())
            }
            UnavailableReason::SchemaMismatch {
                path,
                expected,
                found,
            } => write!(
                f,
                "{} expects features {found}, dashboard provides {expected}",
                path.display()
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Bundle and load state
// ---------------------------------------------------------------------------

/// Model plus the three encoders. Only usable as a whole.
#[derive(Debug)]
pub struct ArtifactBundle {
    model: Box<dyn Classifier>,
    gender: CategoryEncoder,
    membership: CategoryEncoder,
    satisfaction: CategoryEncoder,
}

impl ArtifactBundle {
    pub fn new(
        model: Box<dyn Classifier>,
        gender: CategoryEncoder,
        membership: CategoryEncoder,
        satisfaction: CategoryEncoder,
    ) -> Self {
        Self {
            model,
            gender,
            membership,
            satisfaction,
        }
    }

    pub fn model(&self) -> &dyn Classifier {
        self.model.as_ref()
    }

    pub fn gender_encoder(&self) -> &CategoryEncoder {
        &self.gender
    }

    pub fn membership_encoder(&self) -> &CategoryEncoder {
        &self.membership
    }

    pub fn satisfaction_encoder(&self) -> &CategoryEncoder {
        &self.satisfaction
    }
}

/// Outcome of artifact loading, checked by every consumer before use.
#[derive(Debug)]
pub enum ArtifactState {
    Loaded(ArtifactBundle),
    Unavailable(UnavailableReason),
}

impl ArtifactState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ArtifactState::Loaded(_))
    }

    /// The bundle, or [`DashboardError::ModelUnavailable`].
    pub fn bundle(&self) -> DashboardResult<&ArtifactBundle> {
        match self {
            ArtifactState::Loaded(bundle) => Ok(bundle),
            ArtifactState::Unavailable(reason) => {
                Err(DashboardError::ModelUnavailable(reason.clone()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load all four artifacts. Never fails: any problem turns the whole bundle
/// into [`ArtifactState::Unavailable`] carrying the first failure.
pub fn load_artifacts(paths: &ArtifactPaths) -> ArtifactState {
    match load_bundle(paths) {
        Ok(bundle) => {
            log::info!(
                "Loaded model and encoders (membership classes {:?}, satisfaction classes {:?})",
                bundle.membership.classes(),
                bundle.satisfaction.classes()
            );
            ArtifactState::Loaded(bundle)
        }
        Err(reason) => {
            log::warn!("Prediction disabled: {reason}");
            ArtifactState::Unavailable(reason)
        }
    }
}

/// Load all four artifacts, failing with the reason of the first problem in
/// the order model, gender, membership, satisfaction. Every artifact is
/// attempted so each failure shows up in the log.
pub fn load_bundle(paths: &ArtifactPaths) -> Result<ArtifactBundle, UnavailableReason> {
    let model = load_model(&paths.model);
    let gender = load_encoder("gender", &paths.gender_encoder);
    let membership = load_encoder("membership", &paths.membership_encoder);
    let satisfaction = load_encoder("satisfaction", &paths.satisfaction_encoder);

    let failures = [
        model.as_ref().err(),
        gender.as_ref().err(),
        membership.as_ref().err(),
        satisfaction.as_ref().err(),
    ];
    for reason in failures.into_iter().flatten() {
        log::warn!("artifact unavailable: {reason}");
    }

    Ok(ArtifactBundle::new(model?, gender?, membership?, satisfaction?))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, UnavailableReason> {
    if !path.exists() {
        return Err(UnavailableReason::Missing {
            path: path.to_path_buf(),
        });
    }
    let corrupt = |detail: String| UnavailableReason::Corrupt {
        path: path.to_path_buf(),
        detail,
    };
    let text = std::fs::read_to_string(path).map_err(|e| corrupt(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| corrupt(e.to_string()))
}

fn load_model(path: &Path) -> Result<Box<dyn Classifier>, UnavailableReason> {
    let artifact: ModelArtifact = read_json(path)?;

    if !SATISFACTION_FEATURES.matches(artifact.schema_version, &artifact.feature_names) {
        return Err(UnavailableReason::SchemaMismatch {
            path: path.to_path_buf(),
            expected: format!(
                "v{} {:?}",
                SATISFACTION_FEATURES.version, SATISFACTION_FEATURES.columns
            ),
            found: format!("v{} {:?}", artifact.schema_version, artifact.feature_names),
        });
    }

    artifact
        .model
        .validate(SATISFACTION_FEATURES.len())
        .map_err(|e| UnavailableReason::Corrupt {
            path: path.to_path_buf(),
            detail: format!("{e:#}"),
        })?;

    Ok(Box::new(artifact.model))
}

fn load_encoder(name: &str, path: &Path) -> Result<CategoryEncoder, UnavailableReason> {
    let artifact: EncoderArtifact = read_json(path)?;
    CategoryEncoder::from_artifact(name, artifact).map_err(|e| UnavailableReason::Corrupt {
        path: path.to_path_buf(),
        detail: format!("{e:#}"),
    })
}
