use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("model artifact not found at {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    #[error("model artifact at {} is invalid: {reason}", path.display())]
    ArtifactInvalid { path: PathBuf, reason: String },

    #[error("model expects feature '{0}' which the patient record does not provide")]
    UnknownFeature(String),

    #[error("model returned probability {0} outside [0, 1]")]
    InvalidProbability(f64),

    #[error("failed to read model artifact: {0}")]
    Io(String),
}
