//! Domain check for incoming queries
//!
//! A query is accepted when its lower-cased text contains any keyword of a
//! fixed vocabulary as a plain substring. There is no tokenization or
//! stemming, so "beers" matches "beer" and "BEER garden" matches both.

use crate::error::{EMPTY_QUERY_MESSAGE, INVALID_QUERY_MESSAGE};
use crate::{PubfinderError, Result};

/// Venue types accepted as in-domain
const VENUE_KEYWORDS: &[&str] = &[
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
    "dive bar",
    "wine bar",
    "cocktail bar",
    "sports bar",
    "speakeasy",
    "distillery",
    "cidery",
    "biergarten",
    "beer garden",
    "alehouse",
    "nightlife",
];

/// Drinks accepted as in-domain
const DRINK_KEYWORDS: &[&str] = &[
    "beer",
    "ale",
    "ipa",
    "lager",
    "stout",
    "porter",
    "pilsner",
    "cider",
    "craft",
    "brew",
    "guinness",
    "cocktail",
    "whiskey",
    "whisky",
    "bourbon",
    "scotch",
    "wine",
    "spirits",
    "tequila",
    "margarita",
    "martini",
    "vodka",
    "drink",
    "booze",
    "on tap",
];

/// Activities and amenities accepted as in-domain
const ACTIVITY_KEYWORDS: &[&str] = &[
    "happy hour",
    "trivia",
    "karaoke",
    "live music",
    "sports",
    "tv",
    "darts",
    "billiards",
    "patio",
    "rooftop",
    "outdoor seating",
];

/// The default domain vocabulary, in match order
pub fn default_domain_keywords() -> Vec<String> {
    VENUE_KEYWORDS
        .iter()
        .chain(DRINK_KEYWORDS)
        .chain(ACTIVITY_KEYWORDS)
        .map(|k| k.to_string())
        .collect()
}

/// Accepts or rejects queries before any embedding call is made.
#[derive(Debug, Clone)]
pub struct QueryValidator {
    keywords: Vec<String>,
}

impl QueryValidator {
    /// Create a validator over a custom vocabulary
    pub fn new(keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// The active vocabulary
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when the query mentions any domain keyword
    pub fn is_valid(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        !needle.is_empty() && self.keywords.iter().any(|k| needle.contains(k.as_str()))
    }

    /// Return the trimmed query, or an `InvalidQuery` error carrying guidance text
    pub fn validate<'q>(&self, query: &'q str) -> Result<&'q str> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(PubfinderError::invalid_query(EMPTY_QUERY_MESSAGE));
        }
        if !self.is_valid(trimmed) {
            return Err(PubfinderError::invalid_query(INVALID_QUERY_MESSAGE));
        }
        Ok(trimmed)
    }
}

impl Default for QueryValidator {
    fn default() -> Self {
        Self::new(default_domain_keywords())
    }
}
