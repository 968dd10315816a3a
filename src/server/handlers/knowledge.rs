use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::errors::ApiError;
use crate::models::{
    DocumentResponse, KnowledgeDocument, SearchParams, SearchResponse, SearchResultResponse,
};
use crate::state::AppState;

pub async fn add_document(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<KnowledgeDocument>,
) -> Result<impl IntoResponse, ApiError> {
    let document_id = state
        .knowledge
        .add_document(
            &payload.content,
            payload.title.as_deref(),
            payload.metadata,
        )
        .await?;

    Ok(Json(DocumentResponse {
        success: true,
        document_id: Some(document_id),
        message: "Document added successfully".to_string(),
    }))
}

pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> impl IntoResponse {
    if state.knowledge.delete_document(&document_id).await {
        Json(DocumentResponse {
            success: true,
            document_id: Some(document_id),
            message: "Document deleted successfully".to_string(),
        })
    } else {
        Json(DocumentResponse {
            success: false,
            document_id: None,
            message: "Failed to delete document".to_string(),
        })
    }
}

pub async fn search_knowledge(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let hits = state.knowledge.search(&params.query, params.top_k).await?;

    let results = hits
        .into_iter()
        .map(|hit| SearchResultResponse {
            content: hit.content,
            score: hit.score,
            metadata: hit.metadata,
        })
        .collect();

    Ok(Json(SearchResponse {
        query: params.query,
        results,
    }))
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.knowledge.stats().await?;
    Ok(Json(stats))
}
