use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::{Settings, StoreBackend};
use crate::llm::{GenerationService, OpenAiProvider, SelfHostedProvider, TextProvider};
use crate::rag::RagEngine;
use crate::store::{HttpEmbedder, KnowledgeStore, MemoryIndex, PineconeIndex, VectorIndex};

/// Shared per-process state: settings plus the gateways and the orchestrator,
/// constructed once at startup and injected by reference everywhere else.
pub struct AppState {
    pub settings: Settings,
    pub knowledge: Arc<KnowledgeStore>,
    pub generation: Arc<GenerationService>,
    pub rag: Arc<RagEngine>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn initialize(settings: Settings) -> Arc<Self> {
        let knowledge = Arc::new(build_knowledge_store(&settings));
        let generation = Arc::new(build_generation_service(&settings));
        Self::with_gateways(settings, knowledge, generation)
    }

    /// Assemble state from pre-built gateways. Lets tests inject fakes.
    pub fn with_gateways(
        settings: Settings,
        knowledge: Arc<KnowledgeStore>,
        generation: Arc<GenerationService>,
    ) -> Arc<Self> {
        let rag = Arc::new(RagEngine::new(knowledge.clone(), generation.clone()));

        Arc::new(AppState {
            settings,
            knowledge,
            generation,
            rag,
            started_at: Utc::now(),
        })
    }
}

fn build_knowledge_store(settings: &Settings) -> KnowledgeStore {
    if settings.store_offline() {
        tracing::info!("store credentials missing; knowledge store running in demo mode");
        return KnowledgeStore::offline();
    }

    let Some(embedding_url) = &settings.embedding_api_url else {
        tracing::warn!(
            "no embedding endpoint configured; knowledge store falling back to demo mode"
        );
        return KnowledgeStore::offline();
    };

    let embedder = Arc::new(HttpEmbedder::new(embedding_url, &settings.embedding_model));

    let index: Arc<dyn VectorIndex> = match settings.store_backend {
        StoreBackend::Memory => {
            tracing::info!("using in-process memory index");
            Arc::new(MemoryIndex::new())
        }
        StoreBackend::Pinecone => {
            let host = settings.pinecone_host();
            tracing::info!("using pinecone index at {}", host);
            Arc::new(PineconeIndex::new(
                &host,
                settings.pinecone_api_key.as_deref().unwrap_or_default(),
            ))
        }
    };

    KnowledgeStore::new(embedder, index)
}

fn build_generation_service(settings: &Settings) -> GenerationService {
    if settings.generation_offline() {
        tracing::info!("no generation credentials; LLM running in demo mode");
        return GenerationService::offline();
    }

    let primary: Option<Arc<dyn TextProvider>> = settings.llm_api_url.as_deref().map(|url| {
        Arc::new(SelfHostedProvider::new(url, settings.llm_api_key.as_deref()))
            as Arc<dyn TextProvider>
    });

    let secondary: Option<Arc<dyn TextProvider>> = settings
        .openai_api_key
        .as_deref()
        .map(|key| Arc::new(OpenAiProvider::new(key)) as Arc<dyn TextProvider>);

    GenerationService::new(primary, secondary)
}
