//! Configuration management and environment variable loading

use crate::geo::Coordinate;
use crate::{PubfinderError, Result};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Default Voyage embeddings endpoint
pub const DEFAULT_VOYAGE_ENDPOINT: &str = "https://api.voyageai.com/v1/embeddings";
/// Default Voyage embedding model
pub const DEFAULT_VOYAGE_MODEL: &str = "voyage-3.5";
/// Default OpenAI-compatible API base
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Default summarization model
pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-4o-mini";

/// Load environment variables from .env file
///
/// Safe to call when no .env file exists; only a malformed file is an error.
///
/// # Example
///
/// ```no_run
/// use pubfinder_core::load_env;
///
/// load_env().ok();
/// let api_key = std::env::var("VOYAGE_API_KEY").unwrap_or_default();
/// ```
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!("Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => Err(PubfinderError::config(format!(
            "Failed to parse .env file at line {}, position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => {
            tracing::debug!("No .env file found - using system environment variables only");
            Ok(())
        }
        Err(e) => Err(PubfinderError::config(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

/// Load environment variables from a specific file
pub fn load_env_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    match dotenvy::from_path(path.as_ref()) {
        Ok(_) => {
            tracing::info!("Loaded environment from: {}", path.as_ref().display());
            Ok(())
        }
        Err(e) => Err(PubfinderError::config(format!(
            "Failed to load {} environment file: {}",
            path.as_ref().display(),
            e
        ))),
    }
}

/// Get required environment variable
///
/// Returns an error if the variable is not set or blank
pub fn get_required_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PubfinderError::config(format!(
            "Required environment variable '{}' is not set. \
             Check your .env file or system environment.",
            key
        ))),
    }
}

/// Get optional environment variable, treating blank values as unset
pub fn get_optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get optional environment variable with default
pub fn get_env_or(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get environment variable as integer
pub fn get_env_int<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Get environment variable as float
pub fn get_env_float(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(default)
}

/// Settings for the embedding provider
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// Bearer token
    pub api_key: String,
    /// Full embeddings URL
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl EmbeddingConfig {
    /// Config with default endpoint, model and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_VOYAGE_ENDPOINT.to_string(),
            model: DEFAULT_VOYAGE_MODEL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Read `VOYAGE_*` variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: get_required_env("VOYAGE_API_KEY")?,
            endpoint: get_env_or("VOYAGE_ENDPOINT", DEFAULT_VOYAGE_ENDPOINT),
            model: get_env_or("VOYAGE_API_MODEL", DEFAULT_VOYAGE_MODEL),
            timeout: Duration::from_secs(get_env_int("VOYAGE_TIMEOUT_SECS", 30u64)),
        })
    }
}

/// Settings for the MongoDB vector-search store
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection string
    pub uri: String,
    /// Database name
    pub database: String,
    /// Venue collection
    pub collection: String,
    /// Atlas vector index name
    pub index: String,
    /// Document field holding the embedding
    pub path: String,
}

impl MongoConfig {
    /// Config with the default collection, index and path
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            collection: "pub-data".to_string(),
            index: "vector_index".to_string(),
            path: "embedding".to_string(),
        }
    }

    /// Read `MONGODB_*` variables; `None` when no URI is configured
    pub fn from_env() -> Option<Self> {
        let uri = get_optional_env("MONGODB_URI")?;
        let mut config = Self::new(uri, get_env_or("MONGODB_DATABASE", "pubfinder"));
        config.collection = get_env_or("MONGODB_COLLECTION", &config.collection);
        config.index = get_env_or("MONGODB_VECTOR_INDEX", &config.index);
        Some(config)
    }
}

/// Settings for the review summarizer's text-generation provider
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Bearer token
    pub api_key: String,
    /// API base, without the `/chat/completions` suffix
    pub base_url: String,
    /// Chat model identifier
    pub model: String,
    /// Hard bound on one summarization call
    pub timeout: Duration,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token ceiling
    pub max_tokens: u32,
}

impl SummarizerConfig {
    /// Config with default endpoint, model and sampling settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_SUMMARY_MODEL.to_string(),
            timeout: Duration::from_secs(10),
            temperature: 0.3,
            max_tokens: 150,
        }
    }

    /// Read `OPENAI_*` variables; `None` disables summarization
    pub fn from_env() -> Option<Self> {
        let mut config = Self::new(get_optional_env("OPENAI_API_KEY")?);
        config.base_url = get_env_or("OPENAI_BASE_URL", &config.base_url);
        config.model = get_env_or("OPENAI_MODEL", &config.model);
        config.timeout = Duration::from_secs(get_env_int("SUMMARY_TIMEOUT_SECS", 10u64));
        Some(config)
    }
}

/// Pipeline-level search settings
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Reference point used when the caller supplies none
    pub reference: Coordinate,
    /// ANN candidate pool size
    pub num_candidates: usize,
    /// Records requested from the store
    pub limit: usize,
    /// Results returned to the caller
    pub max_results: usize,
    /// Bound on the vector-search call
    pub upstream_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            reference: Coordinate::DENVER,
            num_candidates: 200,
            limit: 20,
            max_results: 5,
            upstream_timeout: Duration::from_secs(30),
        }
    }
}

impl SearchConfig {
    /// Read `PUBFINDER_*` variables over the defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            reference: Coordinate::new(
                get_env_float("PUBFINDER_REFERENCE_LAT", defaults.reference.latitude),
                get_env_float("PUBFINDER_REFERENCE_LNG", defaults.reference.longitude),
            ),
            num_candidates: get_env_int("PUBFINDER_NUM_CANDIDATES", defaults.num_candidates),
            limit: get_env_int("PUBFINDER_SEARCH_LIMIT", defaults.limit),
            max_results: get_env_int("PUBFINDER_MAX_RESULTS", defaults.max_results),
            upstream_timeout: Duration::from_secs(get_env_int(
                "PUBFINDER_UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout.as_secs(),
            )),
        }
    }
}

/// Everything a deployment needs, read once at startup
#[derive(Debug, Clone)]
pub struct PubfinderConfig {
    /// Embedding provider settings
    pub embedding: EmbeddingConfig,
    /// MongoDB settings, if configured
    pub mongo: Option<MongoConfig>,
    /// Summarizer settings, if configured
    pub summarizer: Option<SummarizerConfig>,
    /// Search settings
    pub search: SearchConfig,
}

impl PubfinderConfig {
    /// Build the full configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            embedding: EmbeddingConfig::from_env()?,
            mongo: MongoConfig::from_env(),
            summarizer: SummarizerConfig::from_env(),
            search: SearchConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_int() {
        env::set_var("PUBFINDER_TEST_INT", "42");
        assert_eq!(get_env_int("PUBFINDER_TEST_INT", 0), 42);
        assert_eq!(get_env_int("PUBFINDER_TEST_NONEXISTENT", 99), 99);
        env::remove_var("PUBFINDER_TEST_INT");
    }

    #[test]
    fn test_get_env_float() {
        env::set_var("PUBFINDER_TEST_FLOAT", "39.75");
        assert_eq!(get_env_float("PUBFINDER_TEST_FLOAT", 0.0), 39.75);
        assert_eq!(get_env_float("PUBFINDER_TEST_NONEXISTENT", 1.5), 1.5);
        env::remove_var("PUBFINDER_TEST_FLOAT");
    }

    #[test]
    fn test_get_env_or_ignores_blank() {
        env::set_var("PUBFINDER_TEST_BLANK", "   ");
        assert_eq!(get_env_or("PUBFINDER_TEST_BLANK", "default"), "default");
        assert!(get_required_env("PUBFINDER_TEST_BLANK").is_err());
        env::remove_var("PUBFINDER_TEST_BLANK");
    }

    #[test]
    fn test_search_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.reference, Coordinate::DENVER);
        assert_eq!(config.num_candidates, 200);
        assert_eq!(config.limit, 20);
        assert_eq!(config.max_results, 5);
    }

    #[test]
    fn test_summarizer_config_defaults() {
        let config = SummarizerConfig::new("sk-test");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.model, DEFAULT_SUMMARY_MODEL);
        assert!(config.temperature <= 0.5);
    }

    #[test]
    fn test_mongo_config_defaults() {
        let config = MongoConfig::new("mongodb://localhost:27017", "pubs");
        assert_eq!(config.collection, "pub-data");
        assert_eq!(config.index, "vector_index");
        assert_eq!(config.path, "embedding");
    }
}
