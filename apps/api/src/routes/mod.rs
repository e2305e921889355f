pub mod health;
pub mod models;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze;
use crate::export::handlers::handle_export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/models", get(models::models_handler))
        .route(
            "/api/analyze",
            post(handle_analyze).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/export", post(handle_export))
        .with_state(state)
}
