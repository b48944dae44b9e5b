//! OpenAI chat completions provider
//!
//! Implements [`TextGenerator`] over any OpenAI-compatible
//! `/chat/completions` endpoint. Requests are single-shot, non-streaming
//! and never retried; the summarizer above owns the timeout and fallback.

#![warn(missing_docs)]
#![warn(clippy::all)]

use async_trait::async_trait;
use pubfinder_core::{CompletionRequest, PubfinderError, Result, SummarizerConfig, TextGenerator};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions client used for review summaries
#[derive(Debug, Clone)]
pub struct OpenAIChatClient {
    client: Client,
    api_key: String,
    url: String,
    model: String,
}

impl OpenAIChatClient {
    /// Build a client from `config`
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(PubfinderError::config("OpenAI API key cannot be empty"));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PubfinderError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            url: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }

    /// Chat model used for every request
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAIChatClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PubfinderError::model(format!("OpenAI API request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
            return Err(PubfinderError::model(format!(
                "OpenAI API returned error status {}: {}",
                status, error_text
            )));
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| PubfinderError::model(format!("Malformed OpenAI response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| PubfinderError::model("No completion content returned"))?;

        debug!("{} returned {} chars", self.model, content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base() {
        let mut config = SummarizerConfig::new("sk-test");
        config.base_url = "http://localhost:8080/v1/".to_string();
        let client = OpenAIChatClient::new(&config).unwrap();
        assert_eq!(client.url, "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_rejects_empty_key() {
        assert!(OpenAIChatClient::new(&SummarizerConfig::new("")).is_err());
    }
}
