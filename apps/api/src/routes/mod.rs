pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::analysis::handlers;
use crate::documents::handlers::handle_extract_document;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // PDF uploads get their own body limit; JSON routes keep axum's default.
    let uploads = Router::new()
        .route("/api/v1/documents/extract", post(handle_extract_document))
        .route(
            "/api/v1/experience/upload",
            post(handlers::handle_experience_upload),
        )
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/experience", post(handlers::handle_experience))
        .route("/api/v1/chat", post(handlers::handle_chat))
        .merge(uploads)
        .with_state(state)
}
