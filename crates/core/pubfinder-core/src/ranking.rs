//! Relevance filtering, ordering and projection of vector-search candidates
//!
//! Stages run in a fixed order:
//!
//! 1. keep candidates that mention a venue/drink keyword and are not a
//!    fast-food chain,
//! 2. sort by similarity (descending), then distance (ascending, unknown last),
//! 3. keep the top `max_results`,
//! 4. project into [`RankedResult`] with defaults for missing fields.

use std::cmp::Ordering;

use tracing::debug;

use crate::geo::Coordinate;
use crate::types::{RankedResult, ScoredVenue, Venue, NO_REVIEWS};

/// Name used for venues stored without one
pub const UNNAMED_VENUE: &str = "Unnamed Pub";
/// Distance text when no distance can be determined
pub const DISTANCE_UNKNOWN: &str = "Distance unknown";
/// Map link used for venues stored without one
pub const MISSING_MAP_URI: &str = "#";

/// Keywords that mark a candidate as a drinking venue
const ALLOW_KEYWORDS: &[&str] = &[
    "pub",
    "bar",
    "brewery",
    "brewpub",
    "brewing",
    "taproom",
    "tap room",
    "taphouse",
    "tavern",
    "saloon",
    "lounge",
    "gastropub",
    "alehouse",
    "distillery",
    "cidery",
    "biergarten",
    "beer",
    "ale",
    "ipa",
    "lager",
    "stout",
    "porter",
    "cocktail",
    "whiskey",
    "whisky",
    "wine",
    "spirits",
    "drink",
    "alcohol",
    "pint",
    "draft",
    "draught",
    "on tap",
    "happy hour",
];

/// Chain brands that are never drinking venues, matched on name and address
const DENY_KEYWORDS: &[&str] = &[
    "mcdonalds",
    "starbucks",
    "dunkin",
    "subway",
    "burger",
    "pizza",
    "taco",
    "kfc",
    "wendys",
    "chipotle",
    "dominos",
    "chick-fil-a",
    "popeyes",
    "arbys",
    "dairy queen",
    "panda express",
    "little caesars",
    "papa johns",
    "jack in the box",
];

/// Lower-case and drop apostrophes so "McDonald's" matches "mcdonalds"
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Keyword allow/deny filter applied to candidate venues.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    allow: Vec<String>,
    deny: Vec<String>,
}

impl RelevanceFilter {
    /// Create a filter from custom allow and deny lists
    pub fn new(
        allow: impl IntoIterator<Item = impl Into<String>>,
        deny: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        fn prepare(keyword: impl Into<String>) -> String {
            normalize(&keyword.into())
        }
        Self {
            allow: allow.into_iter().map(prepare).collect(),
            deny: deny.into_iter().map(prepare).collect(),
        }
    }

    /// True when the venue should be kept.
    ///
    /// Allow keywords are looked up in name, address and reviews; deny
    /// keywords only in name and address. Deny wins.
    pub fn is_relevant(&self, venue: &Venue) -> bool {
        let name = normalize(venue.name.as_deref().unwrap_or_default());
        let address = normalize(venue.formatted_address.as_deref().unwrap_or_default());

        let denied = self
            .deny
            .iter()
            .any(|k| name.contains(k.as_str()) || address.contains(k.as_str()));
        if denied {
            return false;
        }

        let reviews = normalize(venue.reviews.as_deref().unwrap_or_default());
        self.allow.iter().any(|k| {
            name.contains(k.as_str()) || address.contains(k.as_str()) || reviews.contains(k.as_str())
        })
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(ALLOW_KEYWORDS.iter().copied(), DENY_KEYWORDS.iter().copied())
    }
}

/// A candidate that survived filtering, with its resolved distance
#[derive(Debug, Clone, PartialEq)]
pub struct RankedVenue {
    /// The stored record
    pub venue: Venue,
    /// Similarity from vector search
    pub similarity_score: f64,
    /// Miles from the reference point, when known
    pub distance_miles: Option<f64>,
}

impl RankedVenue {
    /// Raw review text, or the placeholder when there is none
    pub fn review_text(&self) -> &str {
        match self.venue.reviews.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => NO_REVIEWS,
        }
    }

    /// Project into the caller-facing result with defaults applied
    pub fn into_result(self, summarized_review: String) -> RankedResult {
        let reviews = self.review_text().to_string();
        let venue = self.venue;
        RankedResult {
            name: venue.name.unwrap_or_else(|| UNNAMED_VENUE.to_string()),
            formatted_address: venue.formatted_address.unwrap_or_default(),
            rating: venue.rating.unwrap_or(0.0),
            reviews,
            summarized_review,
            distance: format_distance(self.distance_miles),
            distance_miles: self.distance_miles,
            map_uri: venue.map_uri.unwrap_or_else(|| MISSING_MAP_URI.to_string()),
            similarity_score: format_similarity(self.similarity_score),
        }
    }
}

/// Use the store's distance when present, else compute from coordinates
pub fn resolve_distance(candidate: &ScoredVenue, reference: &Coordinate) -> Option<f64> {
    candidate
        .distance_miles
        .filter(|d| d.is_finite())
        .or_else(|| {
            candidate
                .venue
                .coordinate()
                .map(|c| reference.distance_to(&c))
        })
}

/// Similarity descending, then distance ascending with unknown distances last
pub fn compare_ranked(a: &RankedVenue, b: &RankedVenue) -> Ordering {
    b.similarity_score
        .total_cmp(&a.similarity_score)
        .then_with(|| {
            let da = a.distance_miles.unwrap_or(f64::INFINITY);
            let db = b.distance_miles.unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        })
}

/// Round to `places` decimals with ties away from zero
fn round_half_up(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// "3.2 miles", or "Distance unknown"
pub fn format_distance(distance_miles: Option<f64>) -> String {
    match distance_miles {
        Some(d) => format!("{:.1} miles", round_half_up(d, 1)),
        None => DISTANCE_UNKNOWN.to_string(),
    }
}

/// Similarity score with exactly eight decimal places
pub fn format_similarity(score: f64) -> String {
    format!("{:.8}", round_half_up(score, 8))
}

/// Filters, orders and truncates vector-search candidates.
#[derive(Debug, Clone)]
pub struct ResultRanker {
    filter: RelevanceFilter,
    max_results: usize,
}

impl ResultRanker {
    /// Create a ranker with a custom filter
    pub fn new(filter: RelevanceFilter, max_results: usize) -> Self {
        Self {
            filter,
            max_results,
        }
    }

    /// Maximum number of results returned by [`rank`](Self::rank)
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Run filter, sort and truncate over `candidates`
    pub fn rank(&self, candidates: Vec<ScoredVenue>, reference: &Coordinate) -> Vec<RankedVenue> {
        let total = candidates.len();
        let mut ranked: Vec<RankedVenue> = candidates
            .into_iter()
            .filter(|c| self.filter.is_relevant(&c.venue))
            .map(|c| {
                let distance_miles = resolve_distance(&c, reference);
                RankedVenue {
                    venue: c.venue,
                    similarity_score: c.similarity_score,
                    distance_miles,
                }
            })
            .collect();

        debug!(
            "Relevance filter kept {} of {} candidates",
            ranked.len(),
            total
        );

        ranked.sort_by(compare_ranked);
        ranked.truncate(self.max_results);
        ranked
    }
}

impl Default for ResultRanker {
    fn default() -> Self {
        Self::new(RelevanceFilter::default(), 5)
    }
}
