use axum::extract::State;
use axum::Json;

use heartrisk_core::inputs::PatientInputs;
use heartrisk_core::schema::{feature_specs, FeatureSpec};

use crate::assess::{evaluate, Assessment};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_schema() -> Json<&'static [FeatureSpec]> {
    Json(feature_specs())
}

pub async fn assess(
    State(state): State<AppState>,
    Json(inputs): Json<PatientInputs>,
) -> Result<Json<Assessment>, ApiError> {
    let assessment = evaluate(&inputs, &state.gateway)?;
    Ok(Json(assessment))
}
