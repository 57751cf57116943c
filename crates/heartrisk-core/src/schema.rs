use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The features the classifier was trained on, declared in training order.
///
/// The derived `Ord` follows declaration order, so ordered collections keyed
/// by `FeatureName` iterate in training order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureName {
    Age,
    Sex,
    Cp,
    Trestbps,
    Chol,
    Fbs,
    Restecg,
    Thalach,
    Exang,
    Oldpeak,
    Slope,
    Ca,
    Thal,
}

impl FeatureName {
    pub const ALL: [FeatureName; 13] = [
        FeatureName::Age,
        FeatureName::Sex,
        FeatureName::Cp,
        FeatureName::Trestbps,
        FeatureName::Chol,
        FeatureName::Fbs,
        FeatureName::Restecg,
        FeatureName::Thalach,
        FeatureName::Exang,
        FeatureName::Oldpeak,
        FeatureName::Slope,
        FeatureName::Ca,
        FeatureName::Thal,
    ];

    /// Column name as seen by the classifier.
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureName::Age => "age",
            FeatureName::Sex => "sex",
            FeatureName::Cp => "cp",
            FeatureName::Trestbps => "trestbps",
            FeatureName::Chol => "chol",
            FeatureName::Fbs => "fbs",
            FeatureName::Restecg => "restecg",
            FeatureName::Thalach => "thalach",
            FeatureName::Exang => "exang",
            FeatureName::Oldpeak => "oldpeak",
            FeatureName::Slope => "slope",
            FeatureName::Ca => "ca",
            FeatureName::Thal => "thal",
        }
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFeature(s.to_string()))
    }
}

/// Whether a feature carries whole numbers or a continuous measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Integer,
    Float,
}

/// Closed interval a slider may take, with an optional step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ValueRange {
    pub fn contains(&self, value: f64) -> bool {
        self.within_bounds(value) && self.on_step(value)
    }

    pub fn within_bounds(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Whether `value` sits on the step grid anchored at `min`.
    pub fn on_step(&self, value: f64) -> bool {
        match self.step {
            Some(step) => {
                let remainder = (value - self.min) % step;
                // Allow floating point tolerance
                remainder < 1e-9 || (step - remainder) < 1e-9
            }
            None => true,
        }
    }
}

/// One entry of a single-choice control: what the user sees and what the
/// model receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
    pub code: i64,
}

/// The bounded control used to collect a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    Slider { range: ValueRange, default: f64 },
    Select { options: Vec<ChoiceOption>, default_index: usize },
    Radio { options: Vec<ChoiceOption>, default_index: usize },
}

impl Control {
    /// Model-side value of the control's default selection.
    pub fn default_value(&self) -> f64 {
        match self {
            Control::Slider { default, .. } => *default,
            Control::Select {
                options,
                default_index,
            }
            | Control::Radio {
                options,
                default_index,
            } => options[*default_index].code as f64,
        }
    }

    /// Whether `value` is something this control can produce.
    pub fn accepts(&self, value: f64) -> bool {
        match self {
            Control::Slider { range, .. } => range.contains(value),
            Control::Select { options, .. } | Control::Radio { options, .. } => {
                options.iter().any(|o| o.code as f64 == value)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: FeatureName,
    pub label: String,
    pub kind: ValueKind,
    pub control: Control,
    pub description: Option<String>,
}

/// A labelled categorical choice with a stable machine code.
///
/// `TABLE` is the single source of truth for the mapping: variant, form id,
/// display label, model code.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    const TABLE: &'static [(Self, &'static str, &'static str, i64)];

    fn id(self) -> &'static str {
        self.entry().1
    }

    fn label(self) -> &'static str {
        self.entry().2
    }

    fn code(self) -> i64 {
        self.entry().3
    }

    fn from_id(id: &str) -> Option<Self> {
        Self::TABLE.iter().find(|e| e.1 == id).map(|e| e.0)
    }

    fn options() -> Vec<ChoiceOption> {
        Self::TABLE
            .iter()
            .map(|(_, id, label, code)| ChoiceOption {
                id: id.to_string(),
                label: label.to_string(),
                code: *code,
            })
            .collect()
    }

    /// Row of `TABLE` describing this variant. Implemented with an
    /// exhaustive `match` so every variant has a row.
    fn index(self) -> usize;

    #[doc(hidden)]
    fn entry(self) -> &'static (Self, &'static str, &'static str, i64) {
        &Self::TABLE[self.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Choice for Sex {
    const TABLE: &'static [(Self, &'static str, &'static str, i64)] = &[
        (Sex::Male, "male", "Male", 1),
        (Sex::Female, "female", "Female", 0),
    ];

    fn index(self) -> usize {
        match self {
            Sex::Male => 0,
            Sex::Female => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChestPain {
    TypicalAngina,
    AtypicalAngina,
    #[default]
    NonAnginalPain,
    Asymptomatic,
}

impl Choice for ChestPain {
    const TABLE: &'static [(Self, &'static str, &'static str, i64)] = &[
        (ChestPain::TypicalAngina, "typical_angina", "Typical Angina (0)", 0),
        (ChestPain::AtypicalAngina, "atypical_angina", "Atypical Angina (1)", 1),
        (ChestPain::NonAnginalPain, "non_anginal_pain", "Non-anginal Pain (2)", 2),
        (ChestPain::Asymptomatic, "asymptomatic", "Asymptomatic (3)", 3),
    ];

    fn index(self) -> usize {
        match self {
            ChestPain::TypicalAngina => 0,
            ChestPain::AtypicalAngina => 1,
            ChestPain::NonAnginalPain => 2,
            ChestPain::Asymptomatic => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YesNo {
    #[default]
    No,
    Yes,
}

impl Choice for YesNo {
    const TABLE: &'static [(Self, &'static str, &'static str, i64)] =
        &[(YesNo::No, "no", "No", 0), (YesNo::Yes, "yes", "Yes", 1)];

    fn index(self) -> usize {
        match self {
            YesNo::No => 0,
            YesNo::Yes => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Thalassemia {
    Normal,
    #[default]
    FixedDefect,
    ReversibleDefect,
}

impl Choice for Thalassemia {
    const TABLE: &'static [(Self, &'static str, &'static str, i64)] = &[
        (Thalassemia::Normal, "normal", "Normal (1)", 1),
        (Thalassemia::FixedDefect, "fixed_defect", "Fixed Defect (2)", 2),
        (Thalassemia::ReversibleDefect, "reversible_defect", "Reversible Defect (3)", 3),
    ];

    fn index(self) -> usize {
        match self {
            Thalassemia::Normal => 0,
            Thalassemia::FixedDefect => 1,
            Thalassemia::ReversibleDefect => 2,
        }
    }
}

/// Every feature with its label, control and encoding, in training order.
pub fn feature_specs() -> &'static [FeatureSpec] {
    static SPECS: LazyLock<Vec<FeatureSpec>> = LazyLock::new(|| {
        vec![
            slider(FeatureName::Age, "Age", 20.0, 80.0, 58.0),
            choice::<Sex>(FeatureName::Sex, "Sex", Sex::default(), false),
            FeatureSpec {
                description: Some("The most important feature".to_string()),
                ..choice::<ChestPain>(
                    FeatureName::Cp,
                    "Chest Pain Type",
                    ChestPain::default(),
                    false,
                )
            },
            FeatureSpec {
                description: Some("Systolic pressure, the top number".to_string()),
                ..slider(
                    FeatureName::Trestbps,
                    "Resting Systolic BP (Top Number)",
                    80.0,
                    200.0,
                    120.0,
                )
            },
            slider(FeatureName::Chol, "Cholesterol (mg/dl)", 100.0, 600.0, 210.0),
            choice::<YesNo>(
                FeatureName::Fbs,
                "Fasting Blood Sugar > 120 mg/dl?",
                YesNo::No,
                true,
            ),
            pass_through(FeatureName::Restecg, "Resting ECG Results", 1),
            slider(FeatureName::Thalach, "Max Heart Rate Achieved", 60.0, 220.0, 130.0),
            choice::<YesNo>(FeatureName::Exang, "Exercise Induced Angina?", YesNo::No, true),
            FeatureSpec {
                name: FeatureName::Oldpeak,
                label: "ST Depression (Oldpeak)".to_string(),
                kind: ValueKind::Float,
                control: Control::Slider {
                    range: ValueRange {
                        min: 0.0,
                        max: 6.2,
                        step: Some(0.01),
                    },
                    default: 1.5,
                },
                description: None,
            },
            pass_through(FeatureName::Slope, "Slope of Peak Exercise ST", 1),
            slider(FeatureName::Ca, "Number of Major Vessels (0-3)", 0.0, 3.0, 0.0),
            choice::<Thalassemia>(
                FeatureName::Thal,
                "Thalassemia",
                Thalassemia::default(),
                false,
            ),
        ]
    });
    &SPECS
}

pub fn feature_spec(name: FeatureName) -> &'static FeatureSpec {
    // `feature_specs` is declared in `FeatureName` order.
    &feature_specs()[name as usize]
}

fn slider(name: FeatureName, label: &str, min: f64, max: f64, default: f64) -> FeatureSpec {
    FeatureSpec {
        name,
        label: label.to_string(),
        kind: ValueKind::Integer,
        control: Control::Slider {
            range: ValueRange {
                min,
                max,
                step: Some(1.0),
            },
            default,
        },
        description: None,
    }
}

fn choice<C: Choice>(name: FeatureName, label: &str, default: C, radio: bool) -> FeatureSpec {
    let options = C::options();
    let default_index = default.index();
    FeatureSpec {
        name,
        label: label.to_string(),
        kind: ValueKind::Integer,
        control: if radio {
            Control::Radio {
                options,
                default_index,
            }
        } else {
            Control::Select {
                options,
                default_index,
            }
        },
        description: None,
    }
}

/// Numeric categorical whose code is its own label (0, 1, 2).
fn pass_through(name: FeatureName, label: &str, default_index: usize) -> FeatureSpec {
    let options = (0..=2)
        .map(|code| ChoiceOption {
            id: code.to_string(),
            label: code.to_string(),
            code,
        })
        .collect();
    FeatureSpec {
        name,
        label: label.to_string(),
        kind: ValueKind::Integer,
        control: Control::Select {
            options,
            default_index,
        },
        description: None,
    }
}
