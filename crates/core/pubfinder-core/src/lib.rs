//! Pubfinder Core
//!
//! Semantic search over a catalogue of pubs, bars and breweries. A free-text
//! query is checked against a domain vocabulary, embedded, matched against
//! stored venue embeddings, filtered and ranked by similarity then distance
//! from a reference point, and each result gets a short review summary.
//!
//! The embedding provider, venue store and text generator are traits so
//! deployments can swap backends; concrete clients live in the provider and
//! storage crates.
//!
//! # Example
//!
//! ```no_run
//! use pubfinder_core::*;
//! use std::sync::Arc;
//!
//! async fn run(
//!     embedder: Arc<dyn EmbeddingProvider>,
//!     store: Arc<dyn VenueStore>,
//! ) -> Result<()> {
//!     let pipeline = SearchPipeline::new(embedder, store, SearchConfig::default());
//!     for result in pipeline.search("craft beer with a patio", None, None).await? {
//!         println!("{} ({})", result.name, result.distance);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod geo;
pub mod pipeline;
pub mod ranking;
pub mod summarizer;
pub mod types;
pub mod utils;
pub mod validation;

pub use config::{
    get_env_float, get_env_int, get_env_or, get_optional_env, get_required_env, load_env,
    load_env_from_path, EmbeddingConfig, MongoConfig, PubfinderConfig, SearchConfig,
    SummarizerConfig,
};
pub use error::{PubfinderError, Result};
pub use geo::{haversine_miles, Coordinate, EARTH_RADIUS_MILES};
pub use pipeline::SearchPipeline;
pub use ranking::{format_distance, format_similarity, RankedVenue, RelevanceFilter, ResultRanker};
pub use summarizer::{truncate_review, ReviewSummarizer};
pub use types::*;
pub use utils::{init_logging, Logger};
pub use validation::QueryValidator;
