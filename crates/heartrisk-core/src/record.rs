use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::inputs::PatientInputs;
use crate::schema::{Choice, FeatureName};

/// A single feature value, keeping whether it was collected as a whole number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Float(f64),
}

impl FeatureValue {
    pub fn as_f64(self) -> f64 {
        match self {
            FeatureValue::Integer(v) => v as f64,
            FeatureValue::Float(v) => v,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Integer(v) => write!(f, "{v}"),
            // Shortest form that round-trips, always with a decimal point.
            FeatureValue::Float(v) => write!(f, "{v:?}"),
        }
    }
}

/// One row of model input, bound by feature name rather than position.
///
/// Always holds exactly one value per [`FeatureName`]. Serializes as a
/// `name -> number` map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PatientRecord {
    values: BTreeMap<FeatureName, FeatureValue>,
}

impl PatientRecord {
    pub fn from_inputs(inputs: &PatientInputs) -> Self {
        use FeatureValue::{Float, Integer};

        let values = BTreeMap::from([
            (FeatureName::Age, Integer(inputs.age)),
            (FeatureName::Sex, Integer(inputs.sex.code())),
            (FeatureName::Cp, Integer(inputs.cp.code())),
            (FeatureName::Trestbps, Integer(inputs.trestbps)),
            (FeatureName::Chol, Integer(inputs.chol)),
            (FeatureName::Fbs, Integer(inputs.fbs.code())),
            (FeatureName::Restecg, Integer(inputs.restecg)),
            (FeatureName::Thalach, Integer(inputs.thalach)),
            (FeatureName::Exang, Integer(inputs.exang.code())),
            (FeatureName::Oldpeak, Float(inputs.oldpeak)),
            (FeatureName::Slope, Integer(inputs.slope)),
            (FeatureName::Ca, Integer(inputs.ca)),
            (FeatureName::Thal, Integer(inputs.thal.code())),
        ]);
        Self { values }
    }

    pub fn get(&self, name: FeatureName) -> Option<FeatureValue> {
        self.values.get(&name).copied()
    }

    /// Look up a value by its column name, as a trained model refers to it.
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        let feature: FeatureName = name.parse().ok()?;
        self.get(feature).map(FeatureValue::as_f64)
    }

    /// Entries in training order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, FeatureValue)> + '_ {
        self.values.iter().map(|(name, value)| (*name, *value))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
