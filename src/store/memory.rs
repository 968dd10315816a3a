//! In-process vector index using brute-force cosine similarity.
//!
//! No external server or credentials required. Suitable for local
//! development and tests at moderate scale; production deployments use
//! `PineconeIndex`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::StoreError;
use super::index::{IndexMatch, IndexRecord, VectorIndex};

#[derive(Default)]
pub struct MemoryIndex {
    records: RwLock<HashMap<String, (Vec<f32>, Map<String, Value>)>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = norm_a * norm_b;

    if denom <= f32::EPSILON {
        0.0
    } else {
        dot / denom
    }
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    async fn upsert(&self, record: IndexRecord) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("index lock poisoned".to_string()))?;
        records.insert(record.id, (record.values, record.metadata));
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("index lock poisoned".to_string()))?;

        let mut scored: Vec<IndexMatch> = records
            .iter()
            .map(|(id, (values, metadata))| IndexMatch {
                id: id.clone(),
                score: cosine_similarity(vector, values),
                metadata: metadata.clone(),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);

        Ok(scored)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("index lock poisoned".to_string()))?;
        records.remove(id);
        Ok(())
    }

    async fn total_vectors(&self) -> Result<u64, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("index lock poisoned".to_string()))?;
        Ok(records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, values: Vec<f32>) -> IndexRecord {
        let mut metadata = Map::new();
        metadata.insert("document_id".to_string(), json!(id));
        IndexRecord {
            id: id.to_string(),
            values,
            metadata,
        }
    }

    #[test]
    fn cosine_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[tokio::test]
    async fn query_orders_by_similarity_and_truncates() {
        let index = MemoryIndex::new();
        index.upsert(record("a", vec![1.0, 0.0])).await.unwrap();
        index.upsert(record("b", vec![0.0, 1.0])).await.unwrap();
        index.upsert(record("c", vec![0.7, 0.7])).await.unwrap();

        let hits = index.query(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "a");
        assert_eq!(hits[1].id, "c");
        assert!(hits[0].score >= hits[1].score);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let index = MemoryIndex::new();
        index.upsert(record("a", vec![1.0])).await.unwrap();
        index.delete("a").await.unwrap();
        index.delete("a").await.unwrap();
        assert_eq!(index.total_vectors().await.unwrap(), 0);
    }
}
