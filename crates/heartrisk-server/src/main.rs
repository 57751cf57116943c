use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use heartrisk_model::gateway::ModelGateway;
use heartrisk_server::state::AppState;
use heartrisk_server::{app, config};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = config::load_config()?;

    // Load once up front; a missing artifact is reported on the page, not fatal.
    let gateway = ModelGateway::new(&config.model_path);
    if gateway.load().is_err() {
        tracing::warn!(
            path = %config.model_path.display(),
            "serving without a model, assessments are disabled"
        );
    }

    let state = AppState::new(gateway)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
