//! Local venue store
//!
//! Brute-force cosine search over venues held in memory, loaded from a JSON
//! array of venue documents. Meant for offline use and tests; datasets of a
//! few thousand venues search in well under a millisecond per query.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod store;

pub use store::{cosine_similarity, LocalVenueStore};
