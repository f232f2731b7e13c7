use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::application::ports::{ChatClient, ChatClientError, ChatRequest};
use crate::domain::PlatformCapabilities;

/// Blocking chat-completion adapter for OpenAI-compatible endpoints (Ollama,
/// Docker Model Runner, Perplexity, LM Studio and friends).
pub struct OpenAiChatClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiChatClient {
    pub const COMPLETION_TIMEOUT: Duration = Duration::from_secs(300);

    pub fn new(
        capabilities: &PlatformCapabilities,
        api_key: Option<&str>,
    ) -> Result<Self, ChatClientError> {
        if capabilities.api_key_required && api_key.map_or(true, str::is_empty) {
            return Err(ChatClientError::MissingApiKey(capabilities.endpoint.clone()));
        }

        let client = Client::builder()
            .timeout(Self::COMPLETION_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");

        Ok(Self {
            client,
            base_url: capabilities.endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.unwrap_or("default").to_string(),
        })
    }
}

impl ChatClient for OpenAiChatClient {
    #[tracing::instrument(skip(self, request), fields(model = %request.model))]
    fn complete(&self, request: &ChatRequest) -> Result<String, ChatClientError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .map_err(|e| ChatClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            return Err(ChatClientError::ApiRequestFailed(format!(
                "completion endpoint returned {status}: {text}"
            )));
        }

        let raw_bytes = response
            .bytes()
            .map_err(|e| ChatClientError::ApiRequestFailed(format!("network/read error: {e}")))?;

        let completion: ChatCompletion = serde_json::from_slice(&raw_bytes).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw_bytes),
                "failed to parse chat completion JSON"
            );
            ChatClientError::InvalidResponse(e.to_string())
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(content)
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}
