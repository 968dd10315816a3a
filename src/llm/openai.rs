use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::ProviderError;
use super::provider::TextProvider;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-3.5-turbo";
const SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct OutgoingMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: IncomingMessage,
}

#[derive(Deserialize)]
struct IncomingMessage {
    content: String,
}

/// Secondary provider: the hosted OpenAI chat-completion API.
pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, OPENAI_CHAT_URL)
    }

    /// Endpoint override for tests.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
        }
    }
}

#[async_trait]
impl TextProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = json!({
            "model": MODEL,
            "messages": [
                OutgoingMessage { role: "system", content: SYSTEM_PROMPT },
                OutgoingMessage { role: "user", content: prompt },
            ],
            "max_tokens": 500,
            "temperature": 0.7,
        });

        let res = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let detail = res.text().await.unwrap_or_default();
            return Err(ProviderError::Http { status, detail });
        }

        let payload: ChatCompletionResponse = res
            .json()
            .await
            .map_err(|_| ProviderError::MalformedResponse)?;

        payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(ProviderError::MalformedResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_system_and_user_turns_with_bearer_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "You are a helpful AI assistant."},
                    {"role": "user", "content": "hello"},
                ],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": " hi "}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("sk-test", &server.uri());
        assert_eq!(provider.complete("hello").await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn missing_choices_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("sk-test", &server.uri());
        assert!(matches!(
            provider.complete("hello").await,
            Err(ProviderError::MalformedResponse)
        ));
    }
}
