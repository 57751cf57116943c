#![allow(dead_code)]

use std::sync::Arc;

use heartrisk_core::record::PatientRecord;
use heartrisk_model::error::ModelError;
use heartrisk_model::gateway::ModelGateway;
use heartrisk_model::Predictor;

/// Answers every record with the same probability.
pub struct FixedPredictor(pub f64);

impl Predictor for FixedPredictor {
    fn predict_probability(&self, _record: &PatientRecord) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

pub fn stub_gateway(probability: f64) -> ModelGateway {
    ModelGateway::with_predictor(Arc::new(FixedPredictor(probability)))
}

pub fn missing_gateway() -> ModelGateway {
    ModelGateway::new("/nonexistent/heart_disease_rf_model.json")
}

/// The reference patient as the browser would submit it.
pub const REFERENCE_FORM: &str = "age=58&sex=male&cp=non_anginal_pain&trestbps=120&chol=210\
    &fbs=no&restecg=1&thalach=130&exang=no&oldpeak=1.5&slope=1&ca=0&thal=fixed_defect";

