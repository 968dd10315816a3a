use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::errors::ApiError;
use crate::models::{ChatMessageRequest, ChatResponse};
use crate::state::AppState;

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    let exchange = state.rag.answer(&payload.message, payload.session_id).await;

    Ok(Json(ChatResponse {
        response: exchange.response,
        sources: exchange.sources,
        session_id: exchange.session_id,
    }))
}

// TODO: persist chat history so this can return real messages; today session
// ids are correlation tokens only and nothing is stored server-side.
pub async fn get_session_history(
    State(_state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    Json(json!({
        "session_id": session_id,
        "messages": [],
    }))
}
