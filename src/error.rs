use std::path::PathBuf;

use thiserror::Error;

use crate::predict::artifacts::UnavailableReason;

/// Errors surfaced by the dashboard's loaders and the prediction pipeline.
///
/// Loader internals work with `anyhow` and are converted into one of these
/// variants at the module boundary, so callers can match on the kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// The dataset could not be read. Nothing can be shown without it.
    #[error("dataset unavailable ({}): {reason}", path.display())]
    DatasetUnavailable { path: PathBuf, reason: String },

    /// One of the model/encoder artifacts failed to load.
    #[error("artifact unavailable: {0}")]
    ArtifactUnavailable(UnavailableReason),

    /// Prediction was requested while the artifact bundle is unavailable.
    #[error("model unavailable: {0}")]
    ModelUnavailable(UnavailableReason),

    /// A label that the encoder never saw at training time.
    #[error("{encoder} encoder does not know category '{label}'")]
    InvalidCategory { encoder: String, label: String },

    /// A class code outside the encoder's known range.
    #[error("{encoder} encoder has no class for code {code}")]
    InvalidCode { encoder: String, code: i64 },

    /// User input rejected at the input boundary.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The configuration file exists but could not be parsed.
    #[error("invalid configuration ({}): {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

/// Result alias used throughout the crate.
pub type DashboardResult<T> = Result<T, DashboardError>;
