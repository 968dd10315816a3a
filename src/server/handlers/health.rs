use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "message": "Personal AI assistant API is running" }))
}

pub async fn health(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// Operational diagnostics: which gateways are live and since when.
pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "started_at": state.started_at.to_rfc3339(),
        "store_backend": state.settings.store_backend.as_str(),
        "store_offline": state.knowledge.is_offline(),
        "generation_offline": state.generation.is_offline(),
    }))
}
