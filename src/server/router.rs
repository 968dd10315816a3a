use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{chat, health, knowledge};
use crate::state::AppState;

/// Main application router: CORS, request tracing, liveness probes, chat and
/// knowledge endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    // Development posture: every origin is allowed. Lock this down behind a
    // reverse proxy before exposing the service publicly.
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/api/status", get(health::get_status))
        .route("/api/chat", post(chat::chat))
        .route("/api/chat/sessions/:session_id", get(chat::get_session_history))
        .route("/api/knowledge", post(knowledge::add_document))
        .route(
            "/api/knowledge/:document_id",
            delete(knowledge::delete_document),
        )
        .route("/api/knowledge/search", get(knowledge::search_knowledge))
        .route("/api/knowledge/stats", get(knowledge::get_stats))
        .with_state(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}
