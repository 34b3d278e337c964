//! Fuzzy search for Thelewale.
//!
//! This crate provides:
//! - Typo-tolerant similarity scoring (approximate substring edit distance)
//! - Multi-field matching ranked by the best field
//! - Match-kind relevance used to break score ties
//! - Unicode-aware tokenization
//!
//! # Example
//!
//! ```
//! use thelewale_search::{FuzzyMatcher, MatchOptions, Searchable};
//!
//! struct Stall { name: &'static str, dishes: Vec<&'static str> }
//!
//! impl Searchable for Stall {
//!     fn search_fields(&self) -> Vec<&str> {
//!         let mut fields = vec![self.name];
//!         fields.extend(self.dishes.iter().copied());
//!         fields
//!     }
//! }
//!
//! let stalls = vec![
//!     Stall { name: "Sharma Chaat Bhandar", dishes: vec!["Pani Puri", "Aloo Tikki"] },
//!     Stall { name: "Momo Point", dishes: vec!["Steamed Momos"] },
//! ];
//!
//! let matcher = FuzzyMatcher::new(MatchOptions::default()).unwrap();
//! // One typo still finds the golgappe stall
//! let results = matcher.search("pani poori", stalls).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].item.name, "Sharma Chaat Bhandar");
//! ```

mod error;
mod fuzzy;
mod matcher;
mod relevance;

pub use error::{Result, SearchError};
pub use fuzzy::{fuzzy_match, levenshtein_distance, similarity, substring_distance, tokenize};
pub use matcher::{FuzzyMatcher, MatchOptions, Searchable, DEFAULT_THRESHOLD, MAX_QUERY_CHARS};
pub use relevance::MatchKind;

/// Search result with similarity score.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResult<T> {
    /// The matched item
    pub item: T,
    /// Similarity of the best field, 0.0 to 1.0 (higher is better)
    pub score: f64,
    /// How the best field matched
    pub kind: MatchKind,
    /// The field text that produced `score`, when a query was given
    pub matched: Option<String>,
}
