use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};

use crate::errors::StoreError;
use super::index::{IndexMatch, IndexRecord, VectorIndex};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pinecone index over its REST data-plane API.
pub struct PineconeIndex {
    host: String,
    api_key: String,
    client: Client,
}

impl PineconeIndex {
    pub fn new(host: &str, api_key: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, StoreError> {
        let url = format!("{}{}", self.host, path);
        let res = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(StoreError::unavailable)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(StoreError::Unavailable(format!(
                "pinecone returned {}: {}",
                status, text
            )));
        }

        res.json().await.map_err(StoreError::unavailable)
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn upsert(&self, record: IndexRecord) -> Result<(), StoreError> {
        let body = json!({
            "vectors": [{
                "id": record.id,
                "values": record.values,
                "metadata": record.metadata,
            }]
        });
        self.post("/vectors/upsert", body).await?;
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>, StoreError> {
        let body = json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": true,
        });
        let payload = self.post("/query", body).await?;

        let matches = payload
            .get("matches")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let results = matches
            .into_iter()
            .map(|m| IndexMatch {
                id: m
                    .get("id")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                score: m.get("score").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
                metadata: m
                    .get("metadata")
                    .and_then(|v| v.as_object())
                    .cloned()
                    .unwrap_or_else(Map::new),
            })
            .collect();

        Ok(results)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let body = json!({ "ids": [id] });
        self.post("/vectors/delete", body).await?;
        Ok(())
    }

    async fn total_vectors(&self) -> Result<u64, StoreError> {
        let payload = self.post("/describe_index_stats", json!({})).await?;
        Ok(payload
            .get("totalVectorCount")
            .and_then(|v| v.as_u64())
            .unwrap_or(0))
    }
}
