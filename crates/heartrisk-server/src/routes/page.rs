use axum::extract::{Query, State};
use axum::response::Html;
use axum::Form;

use heartrisk_core::inputs::PatientInputs;

use crate::assess::{build_page, Trigger};
use crate::error::ApiError;
use crate::state::AppState;

/// The calculator with the selections carried in the query string, or the
/// defaults.
pub async fn show_page(
    State(state): State<AppState>,
    Query(inputs): Query<PatientInputs>,
) -> Result<Html<String>, ApiError> {
    render(&state, &inputs, Trigger::Render)
}

/// "Assess Risk".
pub async fn assess_form(
    State(state): State<AppState>,
    Form(inputs): Form<PatientInputs>,
) -> Result<Html<String>, ApiError> {
    render(&state, &inputs, Trigger::Assess)
}

fn render(state: &AppState, inputs: &PatientInputs, trigger: Trigger) -> Result<Html<String>, ApiError> {
    let view = build_page(inputs, &state.gateway, trigger, jiff::Timestamp::now());
    let html = state.renderer.render(&view)?;
    Ok(Html(html))
}
