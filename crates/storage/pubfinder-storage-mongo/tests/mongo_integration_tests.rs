//! MongoDB integration tests
//!
//! These tests require an Atlas deployment with the venue collection and its
//! vector index already built. Set MONGODB_URI (and optionally
//! MONGODB_DATABASE, MONGODB_COLLECTION, MONGODB_VECTOR_INDEX) to run them.
//!
//! Run with: cargo test -p pubfinder-storage-mongo --test mongo_integration_tests -- --ignored

use pubfinder_core::{MongoConfig, VenueStore};
use pubfinder_storage_mongo::MongoVenueStore;

async fn setup_store() -> Option<MongoVenueStore> {
    let config = MongoConfig::from_env()?;
    MongoVenueStore::connect(&config).await.ok()
}

#[tokio::test]
#[ignore = "Requires MongoDB Atlas instance"]
async fn test_vector_search_respects_limit() {
    let Some(store) = setup_store().await else {
        eprintln!("Skipping test - MongoDB not available");
        return;
    };

    let dimensions: usize = std::env::var("PUBFINDER_EMBEDDING_DIMENSIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1024);
    let query = vec![0.01_f32; dimensions];

    let venues = store.fetch_candidates(&query, 50, 3).await.unwrap();
    assert!(venues.len() <= 3);
    for pair in venues.windows(2) {
        assert!(pair[0].similarity_score >= pair[1].similarity_score);
    }
    for venue in &venues {
        assert!(venue.venue.embedding.is_none());
    }
}

#[tokio::test]
async fn test_connect_rejects_bad_uri() {
    let config = MongoConfig::new("not-a-mongodb-uri", "pubfinder");
    assert!(MongoVenueStore::connect(&config).await.is_err());
}
