use std::sync::Arc;

use heartrisk_export::error::ExportError;
use heartrisk_export::render::PageRenderer;
use heartrisk_model::gateway::ModelGateway;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ModelGateway>,
    pub renderer: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(gateway: ModelGateway) -> Result<Self, ExportError> {
        Ok(Self {
            gateway: Arc::new(gateway),
            renderer: Arc::new(PageRenderer::new()?),
        })
    }
}
