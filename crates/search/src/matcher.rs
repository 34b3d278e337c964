//! Multi-field fuzzy matcher.
//!
//! Every searchable field is scored independently against the query; an item is kept
//! once, with the score of its best field, when that score reaches the minimum
//! similarity implied by the threshold.

use crate::fuzzy::{similarity, tokenize};
use crate::relevance::MatchKind;
use crate::{Result, SearchError, SearchResult};
use serde::{Deserialize, Serialize};

/// Default tolerance: short typos and partial words still match.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Longest accepted query, in characters.
pub const MAX_QUERY_CHARS: usize = 256;

/// Text fields an item exposes to the matcher.
pub trait Searchable {
    /// All fields, equally weighted.
    fn search_fields(&self) -> Vec<&str>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_fields(&self) -> Vec<&str> {
        (**self).search_fields()
    }
}

/// Matcher tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Maximum tolerated normalized edit distance: 0.0 requires exact containment,
    /// 1.0 accepts anything. Larger is looser.
    pub threshold: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl MatchOptions {
    /// Options with the given threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Similarity a field must reach to count as a match.
    pub fn min_similarity(&self) -> f64 {
        1.0 - self.threshold
    }
}

#[derive(Debug, Clone)]
struct BestField {
    score: f64,
    kind: MatchKind,
    text: String,
}

/// Ranks items by their best-matching field.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    options: MatchOptions,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            options: MatchOptions::default(),
        }
    }
}

impl FuzzyMatcher {
    /// Create a matcher.
    ///
    /// # Errors
    /// [`SearchError::InvalidThreshold`] when the threshold is not within 0.0..=1.0.
    pub fn new(options: MatchOptions) -> Result<Self> {
        if !(0.0..=1.0).contains(&options.threshold) {
            return Err(SearchError::InvalidThreshold(options.threshold));
        }
        Ok(Self { options })
    }

    /// The options this matcher was built with.
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Similarity of `query` to a single field, 0.0 to 1.0.
    ///
    /// The field score is the mean over query tokens of each token's similarity to
    /// the closest part of the field.
    #[allow(clippy::cast_precision_loss)]
    pub fn field_score(&self, query: &str, field: &str) -> f64 {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return 1.0;
        }
        let field = field.to_lowercase();
        let total: f64 = tokens.iter().map(|token| similarity(token, &field)).sum();
        total / tokens.len() as f64
    }

    /// Best field score of an item, regardless of the threshold.
    pub fn score<T: Searchable>(&self, query: &str, item: &T) -> f64 {
        self.best_field(query, item).map_or(0.0, |best| best.score)
    }

    fn best_field<T: Searchable>(&self, query: &str, item: &T) -> Option<BestField> {
        let mut best: Option<BestField> = None;

        for field in item.search_fields() {
            if field.trim().is_empty() {
                continue;
            }
            let score = self.field_score(query, field);
            let kind = MatchKind::classify(field, query);

            let better = best.as_ref().is_none_or(|current| {
                score > current.score || (score == current.score && kind > current.kind)
            });
            if better {
                best = Some(BestField {
                    score,
                    kind,
                    text: field.to_string(),
                });
            }
        }

        best
    }

    /// Filter and rank `items` against `query`.
    ///
    /// An empty or whitespace-only query returns every item, in input order, with a
    /// score of 1.0. Otherwise only items whose best field reaches
    /// [`MatchOptions::min_similarity`] are returned, highest score first, then
    /// strongest match kind, then input order. No match is an empty result, not an error.
    ///
    /// # Errors
    /// [`SearchError::InvalidQuery`] when the query is longer than [`MAX_QUERY_CHARS`].
    pub fn search<T: Searchable + Sync>(&self, query: &str, items: Vec<T>) -> Result<Vec<SearchResult<T>>> {
        if query.chars().count() > MAX_QUERY_CHARS {
            return Err(SearchError::InvalidQuery(format!(
                "query exceeds {MAX_QUERY_CHARS} characters"
            )));
        }

        if query.trim().is_empty() {
            return Ok(items
                .into_iter()
                .map(|item| SearchResult {
                    item,
                    score: 1.0,
                    kind: MatchKind::None,
                    matched: None,
                })
                .collect());
        }

        let bests = self.best_fields(query, &items);
        let min_similarity = self.options.min_similarity();

        let mut results: Vec<SearchResult<T>> = items
            .into_iter()
            .zip(bests)
            .filter_map(|(item, best)| {
                let best = best?;
                (best.score >= min_similarity).then(|| SearchResult {
                    item,
                    score: best.score,
                    kind: best.kind,
                    matched: Some(best.text),
                })
            })
            .collect();

        // Stable sort keeps input order for full ties
        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.kind.cmp(&a.kind))
        });

        Ok(results)
    }

    fn best_fields<T: Searchable + Sync>(&self, query: &str, items: &[T]) -> Vec<Option<BestField>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            items
                .par_iter()
                .map(|item| self.best_field(query, item))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            items
                .iter()
                .map(|item| self.best_field(query, item))
                .collect()
        }
    }
}
