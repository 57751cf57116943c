use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::FeatureName;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    #[error("{} input(s) outside their allowed range", .0.len())]
    Validation(Vec<FieldError>),
}

/// A collected value the corresponding control could not have produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: FeatureName,
    pub value: f64,
    pub message: String,
}
