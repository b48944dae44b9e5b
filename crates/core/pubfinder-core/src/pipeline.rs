//! The search-and-rank pipeline
//!
//! validate → embed → retrieve → rank → summarize. Only invalid queries and
//! embedding/vector-search failures reach the caller as errors; everything
//! downstream of retrieval degrades per result.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::config::SearchConfig;
use crate::geo::Coordinate;
use crate::ranking::{RankedVenue, RelevanceFilter, ResultRanker};
use crate::summarizer::{truncate_review, ReviewSummarizer};
use crate::types::{EmbeddingProvider, RankedResult, ScoredVenue, VenueStore};
use crate::validation::QueryValidator;
use crate::{PubfinderError, Result};

/// Orchestrates one search request end to end.
#[derive(Clone)]
pub struct SearchPipeline {
    validator: QueryValidator,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VenueStore>,
    ranker: ResultRanker,
    summarizer: ReviewSummarizer,
    config: SearchConfig,
}

impl SearchPipeline {
    /// Pipeline with the default vocabularies and summarization disabled
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VenueStore>,
        config: SearchConfig,
    ) -> Self {
        let ranker = ResultRanker::new(RelevanceFilter::default(), config.max_results);
        Self {
            validator: QueryValidator::default(),
            embedder,
            store,
            ranker,
            summarizer: ReviewSummarizer::disabled(),
            config,
        }
    }

    /// Replace the review summarizer
    pub fn with_summarizer(mut self, summarizer: ReviewSummarizer) -> Self {
        self.summarizer = summarizer;
        self
    }

    /// Replace the query validator
    pub fn with_validator(mut self, validator: QueryValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Replace the candidate relevance filter
    pub fn with_filter(mut self, filter: RelevanceFilter) -> Self {
        self.ranker = ResultRanker::new(filter, self.config.max_results);
        self
    }

    /// Active search settings
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for venues matching `query`, ranked by similarity then distance.
    ///
    /// Each missing reference component falls back to the configured default.
    /// Returns at most `max_results` entries.
    pub async fn search(
        &self,
        query: &str,
        reference_lat: Option<f64>,
        reference_lng: Option<f64>,
    ) -> Result<Vec<RankedResult>> {
        let query = self.validator.validate(query).map_err(|e| {
            info!("Rejected query {:?}", query);
            e
        })?;
        let reference = Coordinate::new(
            reference_lat.unwrap_or(self.config.reference.latitude),
            reference_lng.unwrap_or(self.config.reference.longitude),
        );

        info!("Searching venues for {:?}", query);

        let embedding = self.embed(query).await?;
        let candidates = self.retrieve(&embedding).await?;
        let ranked = self.ranker.rank(candidates, &reference);

        info!("Ranked {} venues for {:?}", ranked.len(), query);

        Ok(self.summarize_all(ranked, query).await)
    }

    async fn embed(&self, query: &str) -> Result<Vec<f32>> {
        match self.embedder.embed(query).await {
            Ok(vector) if vector.is_empty() => {
                error!("Embedding provider returned an empty vector");
                Err(PubfinderError::embedding("empty embedding vector"))
            }
            Ok(vector) => Ok(vector),
            Err(e) => {
                error!("Embedding request failed: {}", e);
                Err(match e {
                    PubfinderError::Embedding(_) => e,
                    other => PubfinderError::embedding(other.to_string()),
                })
            }
        }
    }

    async fn retrieve(&self, embedding: &[f32]) -> Result<Vec<ScoredVenue>> {
        let fetch = self.store.fetch_candidates(
            embedding,
            self.config.num_candidates,
            self.config.limit,
        );
        match tokio::time::timeout(self.config.upstream_timeout, fetch).await {
            Ok(Ok(candidates)) => {
                debug!("Vector search returned {} candidates", candidates.len());
                Ok(candidates)
            }
            Ok(Err(e)) => {
                error!("Vector search failed: {}", e);
                Err(match e {
                    PubfinderError::VectorSearch(_) => e,
                    other => PubfinderError::vector_search(other.to_string()),
                })
            }
            Err(_) => {
                error!(
                    "Vector search timed out after {:?}",
                    self.config.upstream_timeout
                );
                Err(PubfinderError::vector_search(format!(
                    "timed out after {:?}",
                    self.config.upstream_timeout
                )))
            }
        }
    }

    /// Fan out one summarization task per result and gather them in rank order.
    ///
    /// A task that panics or is cancelled degrades to the truncated review
    /// without affecting its siblings.
    async fn summarize_all(&self, ranked: Vec<RankedVenue>, query: &str) -> Vec<RankedResult> {
        let mut summaries: Vec<Option<String>> = vec![None; ranked.len()];
        let mut tasks = JoinSet::new();

        for (index, venue) in ranked.iter().enumerate() {
            let summarizer = self.summarizer.clone();
            let reviews = venue.review_text().to_string();
            let query = query.to_string();
            tasks.spawn(async move { (index, summarizer.summarize(&reviews, &query).await) });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, summary)) => summaries[index] = Some(summary),
                Err(e) => warn!("Summarization task aborted: {}", e),
            }
        }

        ranked
            .into_iter()
            .zip(summaries)
            .map(|(venue, summary)| {
                let summary = summary.unwrap_or_else(|| truncate_review(venue.review_text()));
                venue.into_result(summary)
            })
            .collect()
    }
}
