use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FieldError};
use crate::record::PatientRecord;
use crate::schema::{feature_spec, ChestPain, Control, Sex, Thalassemia, YesNo};

/// Raw selections from the patient vitals form.
///
/// Labelled choices are held as their enums; sliders and the pass-through
/// categoricals (`restecg`, `slope`) as plain integers. Missing fields take
/// the control defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientInputs {
    pub age: i64,
    pub sex: Sex,
    pub cp: ChestPain,
    pub trestbps: i64,
    pub chol: i64,
    pub fbs: YesNo,
    pub restecg: i64,
    pub thalach: i64,
    pub exang: YesNo,
    pub oldpeak: f64,
    pub slope: i64,
    pub ca: i64,
    pub thal: Thalassemia,
}

impl Default for PatientInputs {
    fn default() -> Self {
        Self {
            age: 58,
            sex: Sex::Male,
            cp: ChestPain::NonAnginalPain,
            trestbps: 120,
            chol: 210,
            fbs: YesNo::No,
            restecg: 1,
            thalach: 130,
            exang: YesNo::No,
            oldpeak: 1.5,
            slope: 1,
            ca: 0,
            thal: Thalassemia::FixedDefect,
        }
    }
}

impl PatientInputs {
    /// Check every value against the control that collects it.
    pub fn validate(&self) -> Vec<FieldError> {
        PatientRecord::from_inputs(self)
            .iter()
            .filter_map(|(name, value)| {
                let spec = feature_spec(name);
                let raw = value.as_f64();
                if spec.control.accepts(raw) {
                    return None;
                }
                let message = match &spec.control {
                    Control::Slider { range, .. } if range.within_bounds(raw) => format!(
                        "{}: {} is not a multiple of {}",
                        spec.label,
                        raw,
                        range.step.unwrap_or(1.0),
                    ),
                    Control::Slider { range, .. } => format!(
                        "{}: {} is outside range [{}, {}]",
                        spec.label, value, range.min, range.max,
                    ),
                    Control::Select { options, .. } | Control::Radio { options, .. } => {
                        let codes: Vec<String> =
                            options.iter().map(|o| o.code.to_string()).collect();
                        format!(
                            "{}: {} is not one of {}",
                            spec.label,
                            value,
                            codes.join(", "),
                        )
                    }
                };
                Some(FieldError {
                    field: name,
                    value: raw,
                    message,
                })
            })
            .collect()
    }

    /// Validate and assemble the record handed to the classifier.
    pub fn collect(&self) -> Result<PatientRecord, CoreError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }
        Ok(PatientRecord::from_inputs(self))
    }
}
