use std::fmt;

use serde::{Deserialize, Serialize};

/// Clinical decision threshold.
///
/// Deliberately below the 0.5 midpoint so screening errs toward referral.
pub const THRESHOLD: f64 = 0.3;

pub const REFER_TO_CARDIOLOGY: &str = "Refer to Cardiology";
pub const STANDARD_FOLLOW_UP: &str = "Standard Follow-up";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLabel {
    High,
    Low,
}

impl RiskLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLabel::High => "HIGH",
            RiskLabel::Low => "LOW",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            RiskLabel::High => REFER_TO_CARDIOLOGY,
            RiskLabel::Low => STANDARD_FOLLOW_UP,
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub risk_label: RiskLabel,
    pub recommendation: &'static str,
}

/// Label a positive-class probability against [`THRESHOLD`].
pub fn classify(probability: f64) -> Classification {
    let risk_label = if probability >= THRESHOLD {
        RiskLabel::High
    } else {
        RiskLabel::Low
    };
    Classification {
        risk_label,
        recommendation: risk_label.recommendation(),
    }
}

/// Outcome of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub probability: f64,
    pub risk_label: RiskLabel,
    pub recommendation: String,
}

impl AssessmentResult {
    pub fn new(probability: f64) -> Self {
        let classification = classify(probability);
        Self {
            probability,
            risk_label: classification.risk_label,
            recommendation: classification.recommendation.to_string(),
        }
    }

    pub fn is_high_risk(&self) -> bool {
        self.risk_label == RiskLabel::High
    }

    /// Probability as a percentage with one decimal, e.g. `45.0%`.
    pub fn percent(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }

    /// Progress bar fill, truncated to a whole percent.
    pub fn progress(&self) -> u8 {
        (self.probability * 100.0).floor().clamp(0.0, 100.0) as u8
    }
}

/// Footnote shown under every result.
pub fn threshold_caption() -> String {
    format!(
        "Note: This tool uses a high-sensitivity threshold of {:.1}%.",
        THRESHOLD * 100.0
    )
}
