//! HTTP-level tests: drive the router with in-process requests.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use assistant_backend::config::{Settings, StoreBackend};
use assistant_backend::errors::StoreError;
use assistant_backend::llm::GenerationService;
use assistant_backend::server::router::router;
use assistant_backend::state::AppState;
use assistant_backend::store::{Embedder, KnowledgeStore, MemoryIndex};

fn test_settings() -> Settings {
    Settings {
        pinecone_api_key: None,
        pinecone_environment: String::new(),
        pinecone_index_name: "personal-assistant".to_string(),
        pinecone_index_host: None,
        store_backend: StoreBackend::Memory,
        llm_api_url: None,
        llm_api_key: None,
        openai_api_key: None,
        embedding_model: "test-model".to_string(),
        embedding_api_url: None,
        port: 0,
        log_dir: PathBuf::from("logs"),
    }
}

/// Deterministic embedder so searches find what was just added.
struct HashingEmbedder;

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut vector = vec![0.0f32; 8];
                for (i, byte) in text.bytes().enumerate() {
                    vector[i % 8] += f32::from(byte);
                }
                vector
            })
            .collect())
    }
}

fn offline_app() -> Router {
    let state = AppState::with_gateways(
        test_settings(),
        Arc::new(KnowledgeStore::offline()),
        Arc::new(GenerationService::offline()),
    );
    router(state)
}

fn memory_app() -> Router {
    let knowledge = Arc::new(KnowledgeStore::new(
        Arc::new(HashingEmbedder),
        Arc::new(MemoryIndex::new()),
    ));
    let state = AppState::with_gateways(
        test_settings(),
        knowledge,
        Arc::new(GenerationService::offline()),
    );
    router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn liveness_endpoints() {
    let app = offline_app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn status_reports_gateway_modes() {
    let app = offline_app();
    let (status, body) = send(&app, get("/api/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store_offline"], true);
    assert_eq!(body["generation_offline"], true);
    assert!(body["started_at"].is_string());
}

#[tokio::test]
async fn chat_in_demo_mode_echoes_the_query() {
    let app = offline_app();
    let (status, body) = send(
        &app,
        post_json(
            "/api/chat",
            json!({"message": "What is the capital of France?"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response = body["response"].as_str().unwrap();
    assert!(response.starts_with("[DEMO MODE]"));
    assert!(response.contains("'What is the capital of France?'"));
    assert_eq!(body["sources"].as_array().unwrap().len(), 0);
    assert!(!body["session_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn chat_preserves_supplied_session_id() {
    let app = offline_app();
    let (status, body) = send(
        &app,
        post_json(
            "/api/chat",
            json!({"message": "hi", "session_id": "session-42"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], "session-42");
}

#[tokio::test]
async fn chat_rejects_empty_message() {
    let app = offline_app();
    let (status, body) = send(&app, post_json("/api/chat", json!({"message": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn session_history_is_an_empty_stub() {
    let app = offline_app();
    let (status, body) = send(&app, get("/api/chat/sessions/abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], "abc");
    assert_eq!(body["messages"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn knowledge_round_trip_over_memory_index() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/knowledge",
            json!({"content": "Paris is the capital of France", "title": "France"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let document_id = body["document_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        get("/api/knowledge/search?query=Paris%20is%20the%20capital%20of%20France&top_k=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["content"], "Paris is the capital of France");
    assert_eq!(results[0]["metadata"]["title"], "France");

    let (status, body) = send(&app, get("/api/knowledge/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_vectors"], 1);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/knowledge/{document_id}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = send(&app, get("/api/knowledge/stats")).await;
    assert_eq!(body["total_vectors"], 0);
}

#[tokio::test]
async fn chat_cites_stored_documents() {
    let app = memory_app();

    send(
        &app,
        post_json(
            "/api/knowledge",
            json!({"content": "Paris is the capital of France", "title": "France"}),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        post_json("/api/chat", json!({"message": "Paris is the capital of France"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let sources = body["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0], "France");
}

#[tokio::test]
async fn offline_knowledge_add_still_returns_an_id() {
    let app = offline_app();
    let (status, body) = send(
        &app,
        post_json("/api/knowledge", json!({"content": "anything"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(!body["document_id"].as_str().unwrap().is_empty());

    // But nothing is searchable.
    let (status, body) = send(&app, get("/api/knowledge/search?query=anything")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
}
