//! Wire-level request/response types for the HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_top_k() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub sources: Vec<String>,
    pub session_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeDocument {
    pub content: String,
    pub title: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResultResponse {
    pub content: String,
    pub score: f32,
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResultResponse>,
}

/// Vector-count statistics for the knowledge base.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub total_vectors: u64,
}
