//! heartrisk-server
//!
//! HTTP front end for the heart disease risk calculator: the server-rendered
//! form and a small JSON API over the same assessment chain.

pub mod assess;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Calculator page
        .route("/", get(routes::page::show_page))
        .route("/assess", post(routes::page::assess_form))
        // JSON API
        .route("/api/schema", get(routes::api::get_schema))
        .route("/api/assess", post(routes::api::assess))
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .with_state(state)
}
