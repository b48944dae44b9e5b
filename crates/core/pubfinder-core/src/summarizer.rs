//! Query-focused review summaries with a deterministic fallback
//!
//! Summarization never fails from the caller's point of view: provider
//! errors, empty completions and timeouts all degrade to a truncated copy of
//! the raw review text.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::SummarizerConfig;
use crate::types::{CompletionRequest, TextGenerator, NO_REVIEWS};

/// Characters kept by the fallback, ellipsis included
pub const FALLBACK_MAX_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

const SYSTEM_PROMPT: &str = "You summarize customer reviews of pubs, bars and breweries. \
Highlight what matters for the user's search: drinks, atmosphere, service, food and \
specific features. Be factual, do not invent details, and keep the summary under 100 words.";

/// True for review text that carries no content worth summarizing
pub fn is_placeholder(reviews: &str) -> bool {
    let normalized = reviews.trim().trim_end_matches('.').to_lowercase();
    normalized.is_empty() || normalized == "no reviews available"
}

/// Cut `reviews` to at most [`FALLBACK_MAX_CHARS`] characters, ending in "..." when cut
///
/// Text within the limit is returned verbatim, whitespace included.
pub fn truncate_review(reviews: &str) -> String {
    if reviews.chars().count() <= FALLBACK_MAX_CHARS {
        return reviews.to_string();
    }
    let keep = FALLBACK_MAX_CHARS - ELLIPSIS.len();
    let mut out: String = reviews.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

fn user_prompt(reviews: &str, query: &str) -> String {
    format!(
        "The user searched for: \"{}\"\n\nReviews:\n{}\n\n\
         Summarize these reviews, focusing on what is most relevant to the search.",
        query, reviews
    )
}

/// Summarizes raw review text through a [`TextGenerator`].
#[derive(Clone)]
pub struct ReviewSummarizer {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
    temperature: f32,
    max_tokens: u32,
}

impl ReviewSummarizer {
    /// Summarizer backed by `generator`, with limits from `config`
    pub fn new(generator: Arc<dyn TextGenerator>, config: &SummarizerConfig) -> Self {
        Self {
            generator: Some(generator),
            timeout: config.timeout,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Summarizer that always uses the truncation fallback
    pub fn disabled() -> Self {
        Self {
            generator: None,
            timeout: Duration::from_secs(10),
            temperature: 0.3,
            max_tokens: 150,
        }
    }

    /// Override the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a text-generation provider is configured
    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Summarize `reviews` for `query`.
    ///
    /// Empty input yields the no-reviews placeholder and the placeholder is
    /// passed through; neither reaches the provider.
    pub async fn summarize(&self, reviews: &str, query: &str) -> String {
        if is_placeholder(reviews) {
            return if reviews.trim().is_empty() {
                NO_REVIEWS.to_string()
            } else {
                reviews.to_string()
            };
        }

        let Some(generator) = &self.generator else {
            return truncate_review(reviews);
        };

        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: user_prompt(reviews, query),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        match tokio::time::timeout(self.timeout, generator.complete(request)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                debug!("Summarized {} chars of reviews", reviews.len());
                text.trim().to_string()
            }
            Ok(Ok(_)) => {
                warn!("Summarizer returned empty text, using truncated reviews");
                truncate_review(reviews)
            }
            Ok(Err(e)) => {
                warn!("Review summarization failed, using truncated reviews: {}", e);
                truncate_review(reviews)
            }
            Err(_) => {
                warn!(
                    "Review summarization timed out after {:?}, using truncated reviews",
                    self.timeout
                );
                truncate_review(reviews)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MockTextGenerator;
    use crate::PubfinderError;
    use async_trait::async_trait;

    fn long_review() -> String {
        "Fantastic hazy IPA on draft and a huge patio. ".repeat(10)
    }

    fn with_mock(mock: MockTextGenerator) -> ReviewSummarizer {
        ReviewSummarizer::new(Arc::new(mock), &SummarizerConfig::new("sk-test"))
    }

    #[tokio::test]
    async fn test_empty_input_returns_placeholder_without_call() {
        // no expectations: any call panics
        let summarizer = with_mock(MockTextGenerator::new());
        assert_eq!(summarizer.summarize("", "craft beer").await, NO_REVIEWS);
        assert_eq!(summarizer.summarize("   ", "craft beer").await, NO_REVIEWS);
        assert_eq!(summarizer.summarize(NO_REVIEWS, "craft beer").await, NO_REVIEWS);
        assert_eq!(
            summarizer.summarize("no reviews available", "craft beer").await,
            "no reviews available"
        );
    }

    #[tokio::test]
    async fn test_success_is_trimmed() {
        let mut mock = MockTextGenerator::new();
        mock.expect_complete()
            .withf(|req| {
                req.user.contains("craft beer")
                    && req.user.contains("hazy IPA")
                    && req.system == SYSTEM_PROMPT
                    && req.max_tokens == 150
            })
            .times(1)
            .returning(|_| Ok("  Known for hazy IPAs and a big patio.\n".to_string()));

        let summary = with_mock(mock).summarize(&long_review(), "craft beer").await;
        assert_eq!(summary, "Known for hazy IPAs and a big patio.");
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_to_truncation() {
        let mut mock = MockTextGenerator::new();
        mock.expect_complete()
            .times(1)
            .returning(|_| Err(PubfinderError::model("status 500")));

        let summary = with_mock(mock).summarize(&long_review(), "patio").await;
        assert!(summary.chars().count() <= FALLBACK_MAX_CHARS);
        assert!(summary.ends_with("..."));
        assert!(long_review().starts_with(summary.trim_end_matches("...")));
    }

    #[tokio::test]
    async fn test_short_review_returned_verbatim_on_failure() {
        let mut mock = MockTextGenerator::new();
        mock.expect_complete()
            .returning(|_| Err(PubfinderError::model("unauthorized")));

        let summary = with_mock(mock).summarize("Good stout.", "stout").await;
        assert_eq!(summary, "Good stout.");
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn complete(&self, _request: CompletionRequest) -> crate::Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_truncation() {
        let summarizer = ReviewSummarizer::new(Arc::new(SlowGenerator), &SummarizerConfig::new("k"))
            .with_timeout(Duration::from_millis(50));
        let summary = summarizer.summarize(&long_review(), "ipa").await;
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), FALLBACK_MAX_CHARS);
    }

    #[tokio::test]
    async fn test_short_review_keeps_surrounding_whitespace() {
        let summarizer = ReviewSummarizer::disabled();
        assert_eq!(
            summarizer.summarize("  Good stout.\n", "stout").await,
            "  Good stout.\n"
        );
        assert_eq!(truncate_review(" Cozy pub. "), " Cozy pub. ");
    }

    #[tokio::test]
    async fn test_disabled_uses_truncation() {
        let summarizer = ReviewSummarizer::disabled();
        assert!(!summarizer.is_enabled());
        assert_eq!(summarizer.summarize("Cozy pub.", "pub").await, "Cozy pub.");
    }

    #[test]
    fn test_truncate_review_multibyte() {
        let text = "é".repeat(250);
        let out = truncate_review(&text);
        assert_eq!(out.chars().count(), FALLBACK_MAX_CHARS);
        assert!(out.ends_with("..."));
    }
}
