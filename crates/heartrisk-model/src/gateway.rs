use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::{error, info};

use heartrisk_core::record::PatientRecord;

use crate::artifact::ClassifierArtifact;
use crate::error::ModelError;
use crate::Predictor;

/// Process-scoped access to the classifier.
///
/// The artifact is read on the first [`load`](Self::load) and the outcome,
/// success or failure, is kept for the lifetime of the gateway. Later calls
/// hand out the same `Arc` without touching storage again.
pub struct ModelGateway {
    path: PathBuf,
    loaded: OnceLock<Result<Arc<dyn Predictor>, ModelError>>,
}

impl ModelGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: OnceLock::new(),
        }
    }

    /// A gateway that is already loaded with `predictor`.
    pub fn with_predictor(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            path: PathBuf::from("<in-memory>"),
            loaded: OnceLock::from(Ok(predictor)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Arc<dyn Predictor>, ModelError> {
        self.loaded
            .get_or_init(|| {
                info!(path = %self.path.display(), "loading model artifact");
                match ClassifierArtifact::from_path(&self.path) {
                    Ok(artifact) => Ok(Arc::new(artifact) as Arc<dyn Predictor>),
                    Err(e) => {
                        error!(path = %self.path.display(), error = %e, "model artifact unavailable");
                        Err(e)
                    }
                }
            })
            .clone()
    }

    pub fn is_available(&self) -> bool {
        self.load().is_ok()
    }

    /// Score `record`, rejecting anything that is not a probability.
    pub fn predict_probability(&self, record: &PatientRecord) -> Result<f64, ModelError> {
        let predictor = self.load()?;
        let probability = predictor.predict_probability(record)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ModelError::InvalidProbability(probability));
        }
        Ok(probability)
    }
}
