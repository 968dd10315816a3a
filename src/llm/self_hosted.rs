use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::errors::ProviderError;
use super::provider::TextProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f64 = 0.7;

/// The two response shapes self-hosted completion servers send back:
/// OpenAI-style `choices[0].text` or a bare `{"response": ...}`. Anything
/// else fails to decode and is treated as malformed.
#[derive(Deserialize)]
#[serde(untagged)]
enum CompletionPayload {
    Choices { choices: Vec<CompletionChoice> },
    Response { response: String },
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

impl CompletionPayload {
    fn into_text(self) -> Result<String, ProviderError> {
        match self {
            CompletionPayload::Choices { choices } => choices
                .into_iter()
                .next()
                .map(|choice| choice.text.trim().to_string())
                .ok_or(ProviderError::MalformedResponse),
            CompletionPayload::Response { response } => Ok(response.trim().to_string()),
        }
    }
}

/// Primary provider: a self-hosted `/completions` endpoint.
pub struct SelfHostedProvider {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl SelfHostedProvider {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self::with_timeout(base_url, api_key, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("failed to build HTTP client"),
        }
    }
}

#[async_trait]
impl TextProvider for SelfHostedProvider {
    fn name(&self) -> &str {
        "self-hosted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/completions", self.base_url);

        let body = json!({
            "prompt": prompt,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let res = request.send().await.map_err(ProviderError::from_reqwest)?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let detail = res.text().await.unwrap_or_default();
            return Err(ProviderError::Http { status, detail });
        }

        let payload: CompletionPayload = res
            .json()
            .await
            .map_err(|_| ProviderError::MalformedResponse)?;

        payload.into_text()
    }
}
