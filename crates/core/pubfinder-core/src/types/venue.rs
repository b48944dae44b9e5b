//! Venue records and ranked search results

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Stand-in review text for venues that have none.
pub const NO_REVIEWS: &str = "No reviews available.";

/// A persisted pub/bar/brewery record.
///
/// Field names follow the stored dataset, so the same struct deserializes
/// from MongoDB documents and from the JSON venue file. Every field is
/// optional; missing values are defaulted when results are projected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Venue name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Street address as formatted by the places provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,

    /// Average rating (0-5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Raw review text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<String>,

    /// Latitude in degrees
    #[serde(default, rename = "lat", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude in degrees
    #[serde(default, rename = "lng", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Google Maps link
    #[serde(default, rename = "GoogleMapURI", skip_serializing_if = "Option::is_none")]
    pub map_uri: Option<String>,

    /// Stored review embedding; absent records are invisible to vector search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Venue {
    /// Coordinates, when both latitude and longitude are present
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }
}

/// A venue returned by vector search, with its similarity score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredVenue {
    /// The stored record
    pub venue: Venue,
    /// Similarity to the query vector (higher is more similar)
    pub similarity_score: f64,
    /// Distance from the reference point, if the store computed one
    pub distance_miles: Option<f64>,
}

impl ScoredVenue {
    /// Wrap a venue with its score and no precomputed distance
    pub fn new(venue: Venue, similarity_score: f64) -> Self {
        Self {
            venue,
            similarity_score,
            distance_miles: None,
        }
    }
}

/// One entry of the final result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    /// Venue name ("Unnamed Pub" when missing)
    pub name: String,
    /// Address (empty when missing)
    pub formatted_address: String,
    /// Rating (0 when missing)
    pub rating: f64,
    /// Raw review text, or the no-reviews placeholder
    pub reviews: String,
    /// Query-focused review summary
    pub summarized_review: String,
    /// "N.N miles" or "Distance unknown"
    pub distance: String,
    /// Numeric distance used for ordering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
    /// Map link ("#" when missing)
    #[serde(rename = "GoogleMapURI")]
    pub map_uri: String,
    /// Similarity score with exactly eight decimal places
    pub similarity_score: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_from_dataset_json() {
        let json = r#"{
            "name": "Wynkoop Brewing Company",
            "formatted_address": "1634 18th St, Denver, CO 80202",
            "rating": 4,
            "reviews": "Great IPA and pool tables.",
            "lat": 39.7533,
            "lng": -104.9984,
            "GoogleMapURI": "https://maps.google.com/?cid=1",
            "embedding": [0.1, 0.2, 0.3]
        }"#;

        let venue: Venue = serde_json::from_str(json).unwrap();
        assert_eq!(venue.name.as_deref(), Some("Wynkoop Brewing Company"));
        assert_eq!(venue.rating, Some(4.0));
        assert_eq!(venue.map_uri.as_deref(), Some("https://maps.google.com/?cid=1"));
        assert_eq!(venue.embedding.as_ref().map(Vec::len), Some(3));
        assert_eq!(venue.coordinate(), Some(Coordinate::new(39.7533, -104.9984)));
    }

    #[test]
    fn test_venue_missing_fields() {
        let venue: Venue = serde_json::from_str(r#"{"name": "Mystery Tavern", "lat": null}"#).unwrap();
        assert_eq!(venue.latitude, None);
        assert_eq!(venue.coordinate(), None);
        assert_eq!(venue.reviews, None);
    }

    #[test]
    fn test_ranked_result_serializes_camel_case() {
        let result = RankedResult {
            name: "Star Bar".to_string(),
            formatted_address: String::new(),
            rating: 4.5,
            reviews: NO_REVIEWS.to_string(),
            summarized_review: NO_REVIEWS.to_string(),
            distance: "1.2 miles".to_string(),
            distance_miles: Some(1.2),
            map_uri: "#".to_string(),
            similarity_score: "0.91000000".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["similarityScore"], "0.91000000");
        assert_eq!(value["GoogleMapURI"], "#");
        assert_eq!(value["summarizedReview"], NO_REVIEWS);
    }
}
