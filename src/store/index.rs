use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::StoreError;

/// A vector plus its metadata, as persisted in the index.
#[derive(Debug, Clone)]
pub struct IndexRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: Map<String, Value>,
}

/// One nearest-neighbor match, highest score first.
#[derive(Debug, Clone)]
pub struct IndexMatch {
    pub id: String,
    pub score: f32,
    pub metadata: Map<String, Value>,
}

/// Abstract vector index backend.
///
/// Implementations: `PineconeIndex` (remote) and `MemoryIndex` (in-process).
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert or replace a record by id.
    async fn upsert(&self, record: IndexRecord) -> Result<(), StoreError>;

    /// Return the `top_k` records most similar to `vector`, with metadata,
    /// in descending score order.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>, StoreError>;

    /// Remove a record by id. Deleting an absent id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Total number of stored vectors.
    async fn total_vectors(&self) -> Result<u64, StoreError>;
}
