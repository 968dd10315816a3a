use std::sync::Arc;

use uuid::Uuid;

use crate::llm::GenerationService;
use crate::store::KnowledgeStore;

/// How many passages ground a chat answer.
const CHAT_TOP_K: usize = 3;

/// One answered chat turn.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub session_id: String,
    pub response: String,
    /// Titles of the grounding documents, aligned with retrieval order;
    /// "Unknown" where a document was stored without a title.
    pub sources: Vec<String>,
}

/// Composes the two gateways into the chat flow: retrieve top-K passages,
/// generate a grounded answer, attribute sources.
///
/// Stateless across calls. Retry and fallback live inside the generation
/// gateway; this layer does no caching, no deduplication and keeps no
/// session history. The session id is a pure correlation token.
pub struct RagEngine {
    knowledge: Arc<KnowledgeStore>,
    generation: Arc<GenerationService>,
}

impl RagEngine {
    pub fn new(knowledge: Arc<KnowledgeStore>, generation: Arc<GenerationService>) -> Self {
        Self {
            knowledge,
            generation,
        }
    }

    pub async fn answer(&self, query: &str, session_id: Option<String>) -> ChatExchange {
        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        // A broken store degrades to an ungrounded answer instead of failing
        // the whole chat turn.
        let hits = match self.knowledge.search(query, CHAT_TOP_K).await {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!("knowledge search failed, answering without context: {}", err);
                Vec::new()
            }
        };

        let response = self.generation.generate(query, &hits, None).await;

        let sources = hits
            .iter()
            .map(|hit| {
                hit.metadata
                    .get("title")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown")
                    .to_string()
            })
            .collect();

        ChatExchange {
            session_id,
            response,
            sources,
        }
    }
}
