//! Atlas vector search over the venue collection
//!
//! The aggregation runs `$vectorSearch` against a pre-built Atlas index,
//! copies the search score into the document, then projects away the stored
//! embedding so large vectors never travel back to the client.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::ClientOptions,
    Client, Collection,
};
use pubfinder_core::{MongoConfig, PubfinderError, Result, ScoredVenue, Venue, VenueStore};
use tracing::{debug, info};

/// Field the pipeline writes the vector search score into
pub const SCORE_FIELD: &str = "similarityScore";

/// Build the aggregation pipeline for one query vector
pub fn build_pipeline(
    config: &MongoConfig,
    query_vector: &[f32],
    num_candidates: usize,
    limit: usize,
) -> Vec<Document> {
    let query_vector: Vec<Bson> = query_vector
        .iter()
        .map(|&v| Bson::Double(v as f64))
        .collect();

    vec![
        doc! {
            "$vectorSearch": {
                "index": config.index.as_str(),
                "path": config.path.as_str(),
                "queryVector": query_vector,
                "numCandidates": num_candidates as i64,
                "limit": limit as i64,
            }
        },
        doc! {
            "$addFields": {
                SCORE_FIELD: { "$meta": "vectorSearchScore" }
            }
        },
        doc! {
            "$project": {
                "_id": 0,
                config.path.as_str(): 0,
            }
        },
    ]
}

/// Decode one aggregation result into a scored venue
///
/// Fields with the wrong BSON type are dropped rather than failing the whole
/// record; a missing score counts as zero.
pub fn parse_candidate(mut doc: Document) -> ScoredVenue {
    let score = match doc.remove(SCORE_FIELD) {
        Some(Bson::Double(v)) => v,
        Some(Bson::Int32(v)) => v as f64,
        Some(Bson::Int64(v)) => v as f64,
        _ => 0.0,
    };

    let venue = Venue {
        name: take_string(&mut doc, "name"),
        formatted_address: take_string(&mut doc, "formatted_address"),
        rating: take_number(&mut doc, "rating"),
        reviews: take_string(&mut doc, "reviews"),
        latitude: take_number(&mut doc, "lat"),
        longitude: take_number(&mut doc, "lng"),
        map_uri: take_string(&mut doc, "GoogleMapURI"),
        embedding: None,
    };

    ScoredVenue::new(venue, score)
}

fn take_string(doc: &mut Document, key: &str) -> Option<String> {
    match doc.remove(key) {
        Some(Bson::String(s)) => Some(s),
        _ => None,
    }
}

fn take_number(doc: &mut Document, key: &str) -> Option<f64> {
    match doc.remove(key) {
        Some(Bson::Double(v)) if v.is_finite() => Some(v),
        Some(Bson::Int32(v)) => Some(v as f64),
        Some(Bson::Int64(v)) => Some(v as f64),
        Some(Bson::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Venue store backed by a MongoDB Atlas collection
pub struct MongoVenueStore {
    collection: Collection<Document>,
    config: MongoConfig,
}

impl MongoVenueStore {
    /// Connect and verify the deployment with a ping
    pub async fn connect(config: &MongoConfig) -> Result<Self> {
        info!("Connecting to MongoDB database: {}", config.database);

        let client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| PubfinderError::database(format!("Failed to parse MongoDB URI: {}", e)))?;

        let client = Client::with_options(client_options).map_err(|e| {
            PubfinderError::database(format!("Failed to create MongoDB client: {}", e))
        })?;

        let db = client.database(&config.database);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| PubfinderError::database(format!("Failed to connect to MongoDB: {}", e)))?;

        info!("Successfully connected to MongoDB");

        Ok(Self {
            collection: db.collection(&config.collection),
            config: config.clone(),
        })
    }

    /// Connect using `MONGODB_*` environment variables
    pub async fn from_env() -> Result<Self> {
        let config = MongoConfig::from_env()
            .ok_or_else(|| PubfinderError::config("MONGODB_URI is not set"))?;
        Self::connect(&config).await
    }

    /// Active collection and index settings
    pub fn config(&self) -> &MongoConfig {
        &self.config
    }
}

#[async_trait]
impl VenueStore for MongoVenueStore {
    async fn fetch_candidates(
        &self,
        query_vector: &[f32],
        num_candidates: usize,
        limit: usize,
    ) -> Result<Vec<ScoredVenue>> {
        let pipeline = build_pipeline(&self.config, query_vector, num_candidates, limit);

        let mut cursor = self
            .collection
            .aggregate(pipeline)
            .await
            .map_err(|e| PubfinderError::vector_search(format!("Vector search failed: {}", e)))?;

        let mut venues = Vec::new();
        while let Some(doc) = cursor.try_next().await.map_err(|e| {
            PubfinderError::vector_search(format!("Failed to iterate search results: {}", e))
        })? {
            venues.push(parse_candidate(doc));
        }

        debug!(
            "Found {} venues via vector search in '{}'",
            venues.len(),
            self.config.collection
        );

        Ok(venues)
    }
}
