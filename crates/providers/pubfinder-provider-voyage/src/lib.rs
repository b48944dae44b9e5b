//! Voyage AI embeddings provider
//!
//! Sends one text per request to the Voyage embeddings endpoint and returns
//! the first embedding in the response. Every failure surfaces as
//! [`PubfinderError::Embedding`]; there are no retries.

#![warn(missing_docs)]
#![warn(clippy::all)]

use async_trait::async_trait;
use pubfinder_core::{EmbeddingConfig, EmbeddingProvider, PubfinderError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// HTTP client for the Voyage embeddings API
#[derive(Debug, Clone)]
pub struct VoyageEmbeddingClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl VoyageEmbeddingClient {
    /// Build a client from `config`
    ///
    /// # Errors
    /// Returns a config error when the API key or endpoint is empty
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(PubfinderError::config("Voyage API key cannot be empty"));
        }
        if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
            return Err(PubfinderError::config(format!(
                "Invalid Voyage endpoint: '{}'. Must start with http:// or https://",
                config.endpoint
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PubfinderError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    /// Build a client from `VOYAGE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&EmbeddingConfig::from_env()?)
    }

    /// Model used for every request
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingProvider for VoyageEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            input: text,
            model: &self.model,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PubfinderError::embedding(format!("Voyage request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
            return Err(PubfinderError::embedding(format!(
                "Voyage API returned error status {}: {}",
                status, error_text
            )));
        }

        let body: EmbeddingResponse = resp.json().await.map_err(|e| {
            PubfinderError::embedding(format!("Malformed Voyage response: {}", e))
        })?;

        let embedding = body
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| PubfinderError::embedding("No embedding returned"))?;

        debug!(
            "Embedded {} chars into {} dimensions with {}",
            text.len(),
            embedding.len(),
            self.model
        );
        Ok(embedding)
    }
}
