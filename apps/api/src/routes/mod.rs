pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::document::handlers as document;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Document API
        .route(
            "/api/v1/documents/extract",
            post(document::handle_extract),
        )
        // Analysis API
        .route(
            "/api/v1/analysis/actions",
            get(analysis::handle_list_actions),
        )
        .route("/api/v1/analysis", post(analysis::handle_analyze_upload))
        .route("/api/v1/analysis/text", post(analysis::handle_analyze_text))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
