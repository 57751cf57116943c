use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use heartrisk_core::error::CoreError;
use heartrisk_core::inputs::PatientInputs;
use heartrisk_core::record::PatientRecord;
use heartrisk_core::risk::AssessmentResult;
use heartrisk_export::view::{PageView, MODEL_MISSING_MESSAGE};
use heartrisk_model::error::ModelError;
use heartrisk_model::gateway::ModelGateway;

#[derive(Debug, Error)]
pub enum AssessError {
    #[error(transparent)]
    Input(#[from] CoreError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// What caused this render: a control change or the Assess Risk button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Render,
    Assess,
}

#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub record: PatientRecord,
    pub result: AssessmentResult,
}

/// Collector → record builder → gateway → classifier.
pub fn evaluate(inputs: &PatientInputs, gateway: &ModelGateway) -> Result<Assessment, AssessError> {
    let record = inputs.collect()?;
    let probability = gateway.predict_probability(&record)?;
    Ok(Assessment {
        record,
        result: AssessmentResult::new(probability),
    })
}

/// Message shown on the page when the classifier could not be loaded.
pub fn model_status_message(gateway: &ModelGateway) -> Option<String> {
    match gateway.load() {
        Ok(_) => None,
        Err(ModelError::ArtifactNotFound { .. }) => Some(MODEL_MISSING_MESSAGE.to_string()),
        Err(other) => Some(format!("The risk model could not be loaded: {other}")),
    }
}

/// Build the whole page for one interaction from explicit state.
pub fn build_page(
    inputs: &PatientInputs,
    gateway: &ModelGateway,
    trigger: Trigger,
    now: jiff::Timestamp,
) -> PageView {
    let model_error = model_status_message(gateway);
    let model_available = model_error.is_none();
    let view = PageView::new(inputs, model_error);

    let errors = inputs.validate();
    if !errors.is_empty() {
        return view.with_field_errors(errors);
    }

    if trigger != Trigger::Assess {
        return view;
    }
    if !model_available {
        warn!("assessment requested while the model is unavailable");
        return view;
    }

    match evaluate(inputs, gateway) {
        Ok(assessment) => view.with_result(&assessment.result, now),
        Err(AssessError::Input(CoreError::Validation(errors))) => view.with_field_errors(errors),
        Err(e) => {
            warn!(error = %e, "assessment failed");
            view.with_assessment_error(format!("The risk model could not score this patient: {e}"))
        }
    }
}
