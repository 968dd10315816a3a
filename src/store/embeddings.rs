use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

const EMBED_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns text into fixed-length vectors.
///
/// The model is fixed at construction; ingestion and queries must share one
/// instance so all vectors live in the same embedding space. Mixing models
/// silently produces meaningless similarity scores.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError>;
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Embedder backed by an OpenAI-compatible `/v1/embeddings` endpoint
/// (llama-server, LM Studio, text-embeddings-inference, ...).
pub struct HttpEmbedder {
    base_url: String,
    model: String,
    client: Client,
}

impl HttpEmbedder {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client: Client::builder()
                .timeout(EMBED_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
        }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError> {
        let url = format!("{}/v1/embeddings", self.base_url);
        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| StoreError::Embedding(err.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(StoreError::Embedding(format!(
                "embedding endpoint returned {}: {}",
                status, text
            )));
        }

        let payload: EmbeddingResponse = res
            .json()
            .await
            .map_err(|err| StoreError::Embedding(err.to_string()))?;

        Ok(payload.data.into_iter().map(|d| d.embedding).collect())
    }
}
