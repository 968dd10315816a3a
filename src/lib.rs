//! Personal AI assistant backend: chat over a retrieval-augmented generation
//! pipeline plus document CRUD against a vector knowledge base.

pub mod config;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod server;
pub mod state;
pub mod store;
