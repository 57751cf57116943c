//! heartrisk-model
//!
//! Loads the pre-trained heart disease classifier and runs inference on a
//! single patient record. The artifact is read at most once per gateway and
//! shared read-only afterwards.

pub mod artifact;
pub mod error;
pub mod gateway;

use heartrisk_core::record::PatientRecord;

use error::ModelError;

/// Anything that can score a patient record.
pub trait Predictor: Send + Sync {
    /// Probability in [0, 1] that the record belongs to the disease class.
    fn predict_probability(&self, record: &PatientRecord) -> Result<f64, ModelError>;
}
