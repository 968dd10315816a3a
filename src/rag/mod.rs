//! RAG orchestration: retrieve, prompt, generate, attribute.

mod engine;

pub use engine::{ChatExchange, RagEngine};
