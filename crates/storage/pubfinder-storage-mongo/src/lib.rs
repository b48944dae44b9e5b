//! Pubfinder MongoDB store
//!
//! Venue retrieval through MongoDB Atlas `$vectorSearch`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use pubfinder_core;

pub mod vector_search;

pub use vector_search::{build_pipeline, parse_candidate, MongoVenueStore, SCORE_FIELD};
