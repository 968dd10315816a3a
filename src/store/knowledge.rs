use std::sync::Arc;

use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::StoreStats;
use super::embeddings::Embedder;
use super::index::{IndexRecord, VectorIndex};

/// One search result: the stored content, its similarity score (higher is
/// more relevant) and the full metadata it was stored with.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub content: String,
    pub score: f32,
    pub metadata: Map<String, Value>,
}

struct LiveStore {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
}

/// The Embedding/Store Gateway.
///
/// Offline mode (no credentials) performs no network I/O: writes are logged
/// and acknowledged, searches return nothing. Live mode embeds text and
/// talks to the injected index. Document content is denormalized into the
/// index metadata so search results are self-contained.
pub struct KnowledgeStore {
    inner: Option<LiveStore>,
}

impl KnowledgeStore {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>) -> Self {
        Self {
            inner: Some(LiveStore { embedder, index }),
        }
    }

    /// A store that simulates success without touching any backend.
    pub fn offline() -> Self {
        Self { inner: None }
    }

    pub fn is_offline(&self) -> bool {
        self.inner.is_none()
    }

    /// Embed `content` and persist it with merged metadata; returns the
    /// generated document id. Ids are assigned here and never change.
    pub async fn add_document(
        &self,
        content: &str,
        title: Option<&str>,
        metadata: Map<String, Value>,
    ) -> Result<String, StoreError> {
        let document_id = Uuid::new_v4().to_string();

        let Some(live) = &self.inner else {
            tracing::info!(
                "[demo] would add document: {}",
                title.unwrap_or("Untitled")
            );
            return Ok(document_id);
        };

        let embeddings = live.embedder.embed(&[content.to_string()]).await?;
        let values = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Embedding("no embedding returned".to_string()))?;

        // Reserved keys overwrite caller metadata so results stay self-contained.
        let mut merged = metadata;
        merged.insert("content".to_string(), json!(content));
        merged.insert(
            "title".to_string(),
            json!(title
                .map(str::to_string)
                .unwrap_or_else(|| format!("Document {}", &document_id[..8]))),
        );
        merged.insert("document_id".to_string(), json!(document_id));

        live.index
            .upsert(IndexRecord {
                id: document_id.clone(),
                values,
                metadata: merged,
            })
            .await?;

        Ok(document_id)
    }

    /// Nearest-neighbor search; results preserve the index ranking order.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, StoreError> {
        let Some(live) = &self.inner else {
            tracing::info!("[demo] would search for: {}", query);
            return Ok(Vec::new());
        };

        let embeddings = live.embedder.embed(&[query.to_string()]).await?;
        let vector = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Embedding("no embedding returned".to_string()))?;

        let matches = live.index.query(&vector, top_k).await?;

        Ok(matches
            .into_iter()
            .map(|m| SearchHit {
                content: m
                    .metadata
                    .get("content")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                score: m.score,
                metadata: m.metadata,
            })
            .collect())
    }

    /// Best-effort delete: backend failures are logged and reported as
    /// `false`, never raised.
    pub async fn delete_document(&self, document_id: &str) -> bool {
        let Some(live) = &self.inner else {
            tracing::info!("[demo] would delete document: {}", document_id);
            return true;
        };

        match live.index.delete(document_id).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("failed to delete document {}: {}", document_id, err);
                false
            }
        }
    }

    pub async fn stats(&self) -> Result<StoreStats, StoreError> {
        let Some(live) = &self.inner else {
            return Ok(StoreStats { total_vectors: 0 });
        };

        let total_vectors = live.index.total_vectors().await?;
        Ok(StoreStats { total_vectors })
    }
}
