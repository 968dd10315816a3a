use std::sync::Arc;

use crate::store::SearchHit;
use super::provider::TextProvider;

const DEFAULT_SNIPPET_CHARS: usize = 500;

const FALLBACK_ANSWER: &str =
    "I apologize, but I'm currently unable to process your request. Please check your LLM configuration.";

/// Build the prompt handed to whichever provider answers.
///
/// With context the prompt carries a numbered "Context" section (each snippet
/// truncated to `max_snippet_chars` characters) and tells the model to prefer
/// it over general knowledge; without context it is instruction-only. The two
/// shapes are a contract the tests pin down.
pub(crate) fn build_prompt(query: &str, context: &[SearchHit], max_snippet_chars: usize) -> String {
    if context.is_empty() {
        return format!(
            "You are a helpful AI assistant. Answer the user's question to the best of your ability.\n\
             \n\
             User Question: {query}\n\
             \n\
             Provide a helpful and accurate response:"
        );
    }

    let context_text = context
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            let snippet: String = hit.content.chars().take(max_snippet_chars).collect();
            format!("Context {}: {}...", i + 1, snippet)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful AI assistant. Use the following context to answer the user's question.\n\
         If the context doesn't contain relevant information, use your general knowledge.\n\
         \n\
         Context:\n\
         {context_text}\n\
         \n\
         User Question: {query}\n\
         \n\
         Provide a helpful and accurate response:"
    )
}

/// The Generation Gateway: primary, then secondary, then a fixed apology.
///
/// Callers always get text back. Provider errors are logged and absorbed by
/// the chain; nothing here returns a `Result`.
pub struct GenerationService {
    primary: Option<Arc<dyn TextProvider>>,
    secondary: Option<Arc<dyn TextProvider>>,
    demo: bool,
}

impl GenerationService {
    pub fn new(
        primary: Option<Arc<dyn TextProvider>>,
        secondary: Option<Arc<dyn TextProvider>>,
    ) -> Self {
        Self {
            primary,
            secondary,
            demo: false,
        }
    }

    /// A service that answers deterministically without network I/O.
    pub fn offline() -> Self {
        Self {
            primary: None,
            secondary: None,
            demo: true,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.demo
    }

    pub async fn generate(
        &self,
        query: &str,
        context: &[SearchHit],
        max_snippet_chars: Option<usize>,
    ) -> String {
        if self.demo {
            return format!(
                "[DEMO MODE] I received your question: '{query}'. In production, I would provide \
                 a detailed response using either your self-hosted LLM or OpenAI. Please configure \
                 your API keys in the .env file to enable full functionality."
            );
        }

        let prompt = build_prompt(
            query,
            context,
            max_snippet_chars.unwrap_or(DEFAULT_SNIPPET_CHARS),
        );

        if let Some(primary) = &self.primary {
            match primary.complete(&prompt).await {
                Ok(text) => return text,
                Err(err) => {
                    tracing::warn!("{} provider failed: {}", primary.name(), err);
                }
            }
        }

        if let Some(secondary) = &self.secondary {
            match secondary.complete(&prompt).await {
                Ok(text) => return text,
                Err(err) => {
                    tracing::warn!("{} provider failed: {}", secondary.name(), err);
                }
            }
        }

        FALLBACK_ANSWER.to_string()
    }
}
