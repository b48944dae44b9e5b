//! Error types for the pubfinder search pipeline

use thiserror::Error;

/// Text shown to the caller when a query is blank.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";

/// Text shown to the caller when a query is not about pubs, bars or drinks.
pub const INVALID_QUERY_MESSAGE: &str =
    "Please search for pubs, bars, breweries, or beer-related terms.";

/// Text shown to the caller for any upstream failure.
pub const UPSTREAM_FAILURE_MESSAGE: &str =
    "Search is temporarily unavailable. Please try again later.";

/// Main error type for pubfinder operations
#[derive(Debug, Error)]
pub enum PubfinderError {
    /// Query is blank or outside the pub/bar/drink domain
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Embedding provider unreachable or returned an unusable response
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector-search datastore failure
    #[error("Vector search error: {0}")]
    VectorSearch(String),

    /// Text-generation provider failure
    #[error("Model error: {0}")]
    Model(String),

    /// Database operation error (custom message)
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type using PubfinderError
pub type Result<T> = std::result::Result<T, PubfinderError>;

impl PubfinderError {
    /// Create an invalid query error
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        PubfinderError::InvalidQuery(msg.into())
    }

    /// Create an embedding error
    pub fn embedding(msg: impl Into<String>) -> Self {
        PubfinderError::Embedding(msg.into())
    }

    /// Create a vector search error
    pub fn vector_search(msg: impl Into<String>) -> Self {
        PubfinderError::VectorSearch(msg.into())
    }

    /// Create a model error
    pub fn model(msg: impl Into<String>) -> Self {
        PubfinderError::Model(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        PubfinderError::Database(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        PubfinderError::Config(msg.into())
    }

    /// True when the caller can fix the problem by rephrasing the query
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, PubfinderError::InvalidQuery(_))
    }

    /// True for failures of an external service
    pub fn is_upstream(&self) -> bool {
        !self.is_invalid_query()
    }

    /// Message suitable for showing to an end user.
    ///
    /// Upstream failures all collapse to one generic message; details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            PubfinderError::InvalidQuery(msg) => msg.clone(),
            _ => UPSTREAM_FAILURE_MESSAGE.to_string(),
        }
    }
}
