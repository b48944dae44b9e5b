//! In-memory venue store implementation

use async_trait::async_trait;
use parking_lot::RwLock;
use pubfinder_core::{PubfinderError, Result, ScoredVenue, Venue, VenueStore};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Cosine similarity of two equal-length vectors; 0 when either has zero norm
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Venue store backed by an in-memory list
#[derive(Default)]
pub struct LocalVenueStore {
    venues: RwLock<Vec<Venue>>,
}

impl LocalVenueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `venues`
    pub fn from_venues(venues: Vec<Venue>) -> Self {
        Self {
            venues: RwLock::new(venues),
        }
    }

    /// Load a JSON array of venue documents
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading venues from {:?}", path);

        let data = fs::read_to_string(path).map_err(|e| {
            PubfinderError::database(format!("Failed to read venue file {:?}: {}", path, e))
        })?;
        let venues: Vec<Venue> = serde_json::from_str(&data)?;

        let embedded = venues.iter().filter(|v| v.embedding.is_some()).count();
        if embedded < venues.len() {
            warn!(
                "{} of {} venues have no embedding and will never match",
                venues.len() - embedded,
                venues.len()
            );
        }
        info!("Loaded {} venues", venues.len());

        Ok(Self::from_venues(venues))
    }

    /// Write all venues back out as a JSON array
    pub fn save_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let venues = self.venues.read();
        let data = serde_json::to_string_pretty(&*venues)?;
        fs::write(path.as_ref(), data)?;
        Ok(())
    }

    /// Add a venue
    pub fn add_venue(&self, venue: Venue) {
        self.venues.write().push(venue);
    }

    /// Get the number of stored venues
    pub fn len(&self) -> usize {
        self.venues.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.venues.read().is_empty()
    }

    /// Score every venue against `query_vector` and keep the best `limit`
    ///
    /// Scores are `(1 + cosine) / 2`, the same scale Atlas reports for
    /// cosine indexes.
    pub fn search(&self, query_vector: &[f32], limit: usize) -> Vec<ScoredVenue> {
        let venues = self.venues.read();
        let mut skipped = 0usize;

        let mut scored: Vec<ScoredVenue> = venues
            .iter()
            .filter_map(|venue| {
                let embedding = venue.embedding.as_deref()?;
                if embedding.len() != query_vector.len() {
                    skipped += 1;
                    return None;
                }
                let score = (1.0 + cosine_similarity(query_vector, embedding)) / 2.0;
                let mut venue = venue.clone();
                venue.embedding = None;
                Some(ScoredVenue::new(venue, score))
            })
            .collect();

        if skipped > 0 {
            warn!(
                "Skipped {} venues with embedding dimension other than {}",
                skipped,
                query_vector.len()
            );
        }

        scored.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        scored.truncate(limit);
        scored
    }
}

#[async_trait]
impl VenueStore for LocalVenueStore {
    async fn fetch_candidates(
        &self,
        query_vector: &[f32],
        num_candidates: usize,
        limit: usize,
    ) -> Result<Vec<ScoredVenue>> {
        if query_vector.is_empty() {
            return Err(PubfinderError::vector_search("Query vector is empty"));
        }
        // exhaustive search, so the pool size only matters for logging
        debug!("Local search over {} venues (pool {})", self.len(), num_candidates);
        let results = self.search(query_vector, limit);
        debug!("Local search returned {} venues", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn venue(name: &str, embedding: Option<Vec<f32>>) -> Venue {
        Venue {
            name: Some(name.to_string()),
            embedding,
            ..Default::default()
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_search_orders_and_limits() {
        let store = LocalVenueStore::from_venues(vec![
            venue("Orthogonal Ale House", Some(vec![0.0, 1.0])),
            venue("Exact Tap Room", Some(vec![2.0, 0.0])),
            venue("Opposite Pub", Some(vec![-1.0, 0.0])),
            venue("No Embedding Bar", None),
            venue("Wrong Dimension Bar", Some(vec![1.0, 0.0, 0.0])),
        ]);

        let results = store.search(&[1.0, 0.0], 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].venue.name.as_deref(), Some("Exact Tap Room"));
        assert!((results[0].similarity_score - 1.0).abs() < 1e-9);
        assert!((results[1].similarity_score - 0.5).abs() < 1e-9);
        assert!(results[0].venue.embedding.is_none());

        let all = store.search(&[1.0, 0.0], 10);
        assert_eq!(all.len(), 3);
        assert!(all[2].similarity_score.abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_fetch_candidates_rejects_empty_vector() {
        let store = LocalVenueStore::new();
        assert!(store.is_empty());
        let err = store.fetch_candidates(&[], 200, 20).await.unwrap_err();
        assert!(matches!(err, PubfinderError::VectorSearch(_)));
    }

    #[tokio::test]
    async fn test_fetch_candidates_caps_at_limit() {
        let store = LocalVenueStore::new();
        for i in 0..30 {
            store.add_venue(venue(&format!("Pub {}", i), Some(vec![1.0, i as f32])));
        }
        assert_eq!(store.len(), 30);

        let results = store.fetch_candidates(&[1.0, 0.0], 200, 20).await.unwrap();
        assert_eq!(results.len(), 20);
        assert_eq!(results[0].venue.name.as_deref(), Some("Pub 0"));
    }

    #[test]
    fn test_json_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("venues.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "Falling Rock Tap House", "rating": 4.6, "lat": 39.7525, "lng": -104.9953, "embedding": [0.1, 0.9]},
                {"name": "Unembedded Tavern", "reviews": "Cold beer."}
            ]"#,
        )
        .unwrap();

        let store = LocalVenueStore::from_json_file(&path).unwrap();
        assert_eq!(store.len(), 2);

        let results = store.search(&[0.1, 0.9], 5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].venue.rating, Some(4.6));

        let copy = temp_dir.path().join("copy.json");
        store.save_json_file(&copy).unwrap();
        assert_eq!(LocalVenueStore::from_json_file(&copy).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(LocalVenueStore::from_json_file(temp_dir.path().join("nope.json")).is_err());
    }
}
