//! Embedding/Store Gateway.
//!
//! Wraps a vector index behind a text-in/results-out API: documents go in as
//! raw text and come back out as scored search hits. Embedding happens here,
//! with the same model for ingestion and queries; callers never see vectors.

mod embeddings;
mod index;
mod knowledge;
mod memory;
mod pinecone;

pub use embeddings::{Embedder, HttpEmbedder};
pub use index::{IndexMatch, IndexRecord, VectorIndex};
pub use knowledge::{KnowledgeStore, SearchHit};
pub use memory::MemoryIndex;
pub use pinecone::PineconeIndex;
