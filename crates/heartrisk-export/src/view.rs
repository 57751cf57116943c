use serde::Serialize;

use heartrisk_core::error::FieldError;
use heartrisk_core::inputs::PatientInputs;
use heartrisk_core::record::PatientRecord;
use heartrisk_core::risk::{threshold_caption, AssessmentResult};
use heartrisk_core::schema::{feature_spec, Control};

pub const PAGE_TITLE: &str = "Heart Disease Risk Calculator";

/// Shown in place of the result whenever the classifier could not be loaded.
pub const MODEL_MISSING_MESSAGE: &str = "Model file not found! Please run 'deploy_model.py' \
     first to generate the model artifact.";

/// Everything the page template needs, built fresh for every request.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub title: String,
    pub fields: Vec<FieldView>,
    pub summary: Vec<SummaryRow>,
    pub model_available: bool,
    pub model_error: Option<String>,
    pub field_errors: Vec<FieldError>,
    /// Inference ran but did not produce a usable probability.
    pub assessment_error: Option<String>,
    pub result: Option<ResultView>,
    pub caption: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: String,
    pub description: Option<String>,
    /// `slider`, `select` or `radio`.
    pub control: &'static str,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub value: String,
    pub options: Vec<OptionView>,
    pub invalid: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub percent: String,
    pub risk_label: String,
    /// `alert` for high risk, `success` otherwise.
    pub badge: &'static str,
    pub recommendation: String,
    pub progress: u8,
    pub assessed_at: String,
}

impl ResultView {
    pub fn new(result: &AssessmentResult, assessed_at: jiff::Timestamp) -> Self {
        Self {
            percent: result.percent(),
            risk_label: format!("{} RISK", result.risk_label),
            badge: if result.is_high_risk() {
                "alert"
            } else {
                "success"
            },
            recommendation: result.recommendation.clone(),
            progress: result.progress(),
            assessed_at: assessed_at.to_string(),
        }
    }
}

impl PageView {
    /// The form and patient summary for `inputs`, before any assessment.
    ///
    /// `model_error` is the reason the classifier is unavailable, if it is.
    pub fn new(inputs: &PatientInputs, model_error: Option<String>) -> Self {
        let record = PatientRecord::from_inputs(inputs);

        let fields = record
            .iter()
            .map(|(name, value)| {
                let spec = feature_spec(name);
                let raw = value.as_f64();
                let (control, range, options) = match &spec.control {
                    Control::Slider { range, .. } => ("slider", Some(*range), Vec::new()),
                    Control::Select { options, .. } => ("select", None, options.clone()),
                    Control::Radio { options, .. } => ("radio", None, options.clone()),
                };
                let options = options
                    .into_iter()
                    .map(|o| OptionView {
                        selected: o.code as f64 == raw,
                        id: o.id,
                        label: o.label,
                    })
                    .collect();
                FieldView {
                    name: name.as_str(),
                    label: spec.label.clone(),
                    description: spec.description.clone(),
                    control,
                    min: range.map(|r| r.min),
                    max: range.map(|r| r.max),
                    step: range.and_then(|r| r.step),
                    value: value.to_string(),
                    options,
                    invalid: false,
                }
            })
            .collect();

        let summary = record
            .iter()
            .map(|(name, value)| SummaryRow {
                name: name.as_str(),
                value: value.to_string(),
            })
            .collect();

        Self {
            title: PAGE_TITLE.to_string(),
            fields,
            summary,
            model_available: model_error.is_none(),
            model_error,
            field_errors: Vec::new(),
            assessment_error: None,
            result: None,
            caption: threshold_caption(),
        }
    }

    pub fn with_result(mut self, result: &AssessmentResult, assessed_at: jiff::Timestamp) -> Self {
        self.result = Some(ResultView::new(result, assessed_at));
        self
    }

    /// Flag the offending controls and list the reasons.
    pub fn with_field_errors(mut self, errors: Vec<FieldError>) -> Self {
        for field in &mut self.fields {
            field.invalid = errors.iter().any(|e| e.field.as_str() == field.name);
        }
        self.field_errors = errors;
        self
    }

    pub fn with_assessment_error(mut self, message: impl Into<String>) -> Self {
        self.assessment_error = Some(message.into());
        self
    }
}
