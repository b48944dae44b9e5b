//! Interfaces to the external services the pipeline consumes

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ScoredVenue;
use crate::Result;

/// Turns text into an embedding vector.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed `text`; any provider failure is an error, never an empty vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Approximate nearest-neighbour search over stored venue embeddings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VenueStore: Send + Sync {
    /// Return up to `limit` venues nearest to `query_vector`, best first.
    ///
    /// `num_candidates` is the size of the pool the index explores before
    /// cutting down to `limit`.
    async fn fetch_candidates(
        &self,
        query_vector: &[f32],
        num_candidates: usize,
        limit: usize,
    ) -> Result<Vec<ScoredVenue>>;
}

/// A single chat-style completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System role instruction
    pub system: String,
    /// User role message
    pub user: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token ceiling
    pub max_tokens: u32,
}

/// Chat-completion text generation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion and return its text
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
