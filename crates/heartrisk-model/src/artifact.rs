use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use heartrisk_core::record::PatientRecord;
use heartrisk_core::schema::FeatureName;

use crate::error::ModelError;
use crate::Predictor;

/// A fitted binary classifier as exported by the training pipeline.
///
/// ```json
/// { "model_type": "random_forest",
///   "feature_names": ["age", "sex", ...],
///   "trees": [ { "nodes": [ { "feature": "cp", "threshold": 0.5, "left": 1, "right": 2 },
///                            { "value": [30.0, 10.0] }, ... ] } ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    /// Columns the model was fitted on. Bound to the record by name.
    pub feature_names: Vec<String>,
    #[serde(flatten)]
    pub estimator: Estimator,
    /// Where the artifact was read from, for error reports.
    #[serde(skip)]
    pub source: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum Estimator {
    RandomForest {
        trees: Vec<DecisionTree>,
    },
    LogisticRegression {
        intercept: f64,
        coefficients: BTreeMap<String, f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Node 0 is the root. Children always come after their parent.
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// `x[feature] <= threshold` goes left.
    Split {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class sample weights; index 1 is the disease class.
    Leaf { value: Vec<f64> },
}

impl ClassifierArtifact {
    /// Read and validate the artifact at `path`.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ModelError::ArtifactNotFound {
                path: path.to_path_buf(),
            },
            _ => ModelError::Io(format!("{}: {e}", path.display())),
        })?;
        let artifact = Self::from_slice(&bytes, path)?;
        info!(
            path = %path.display(),
            model_type = artifact.estimator.kind(),
            features = artifact.feature_names.len(),
            "model artifact loaded"
        );
        Ok(artifact)
    }

    /// Parse and validate artifact bytes. `path` is kept for error reports.
    pub fn from_slice(bytes: &[u8], path: &Path) -> Result<Self, ModelError> {
        let invalid = |reason: String| ModelError::ArtifactInvalid {
            path: path.to_path_buf(),
            reason,
        };
        let mut artifact: ClassifierArtifact =
            serde_json::from_slice(bytes).map_err(|e| invalid(e.to_string()))?;
        artifact.validate().map_err(invalid)?;
        artifact.source = path.to_path_buf();
        Ok(artifact)
    }

    fn validate(&self) -> Result<(), String> {
        if self.feature_names.is_empty() {
            return Err("no feature names".to_string());
        }
        for name in &self.feature_names {
            if name.parse::<FeatureName>().is_err() {
                return Err(format!("feature '{name}' is not part of the patient schema"));
            }
        }

        let declared = |feature: &str| self.feature_names.iter().any(|n| n == feature);

        match &self.estimator {
            Estimator::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err("random forest has no trees".to_string());
                }
                for (t, tree) in trees.iter().enumerate() {
                    if tree.nodes.is_empty() {
                        return Err(format!("tree {t} has no nodes"));
                    }
                    for (i, node) in tree.nodes.iter().enumerate() {
                        match node {
                            TreeNode::Split {
                                feature,
                                left,
                                right,
                                ..
                            } => {
                                if !declared(feature.as_str()) {
                                    return Err(format!(
                                        "tree {t} node {i} splits on undeclared feature '{feature}'"
                                    ));
                                }
                                for child in [*left, *right] {
                                    if child <= i || child >= tree.nodes.len() {
                                        return Err(format!(
                                            "tree {t} node {i} has invalid child {child}"
                                        ));
                                    }
                                }
                            }
                            TreeNode::Leaf { value } => {
                                let total: f64 = value.iter().sum();
                                if value.len() != 2
                                    || value.iter().any(|v| *v < 0.0)
                                    || total <= 0.0
                                {
                                    return Err(format!(
                                        "tree {t} node {i} is not a binary class distribution"
                                    ));
                                }
                            }
                        }
                    }
                }
            }
            Estimator::LogisticRegression { coefficients, .. } => {
                if let Some(name) = coefficients.keys().find(|k| !declared(k.as_str())) {
                    return Err(format!("coefficient for undeclared feature '{name}'"));
                }
            }
        }
        Ok(())
    }

    /// Pull the model's columns out of the record, by name.
    fn bind(&self, record: &PatientRecord) -> Result<BTreeMap<&str, f64>, ModelError> {
        self.feature_names
            .iter()
            .map(|name| {
                record
                    .get_by_name(name)
                    .map(|value| (name.as_str(), value))
                    .ok_or_else(|| ModelError::UnknownFeature(name.clone()))
            })
            .collect()
    }
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::RandomForest { .. } => "random_forest",
            Estimator::LogisticRegression { .. } => "logistic_regression",
        }
    }
}

impl DecisionTree {
    fn predict(&self, row: &BTreeMap<&str, f64>, source: &Path) -> Result<f64, ModelError> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = row
                        .get(feature.as_str())
                        .copied()
                        .ok_or_else(|| ModelError::UnknownFeature(feature.clone()))?;
                    index = if x <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { value }) => {
                    let total: f64 = value.iter().sum();
                    return Ok(value[1] / total);
                }
                None => {
                    return Err(ModelError::ArtifactInvalid {
                        path: source.to_path_buf(),
                        reason: format!("tree node {index} out of bounds"),
                    });
                }
            }
        }
    }
}

impl Predictor for ClassifierArtifact {
    fn predict_probability(&self, record: &PatientRecord) -> Result<f64, ModelError> {
        let row = self.bind(record)?;
        match &self.estimator {
            Estimator::RandomForest { trees } => {
                let mut sum = 0.0;
                for tree in trees {
                    sum += tree.predict(&row, &self.source)?;
                }
                Ok(sum / trees.len() as f64)
            }
            Estimator::LogisticRegression {
                intercept,
                coefficients,
            } => {
                let z = coefficients
                    .iter()
                    .map(|(name, weight)| weight * row.get(name.as_str()).copied().unwrap_or(0.0))
                    .sum::<f64>()
                    + intercept;
                Ok(1.0 / (1.0 + (-z).exp()))
            }
        }
    }
}
