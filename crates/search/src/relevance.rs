//! Match-kind relevance.
//!
//! Used to order results whose similarity scores are equal: an exact field beats a
//! prefix, which beats a match inside the text.

use crate::fuzzy::fuzzy_match;
use serde::{Deserialize, Serialize};

/// How a field matched the query, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Query characters do not appear in order
    #[default]
    None,
    /// Query characters appear in order, with gaps
    Fuzzy,
    /// Query appears inside a word
    Substring,
    /// A later word of the field starts with the query
    WordPrefix,
    /// The field starts with the query
    Prefix,
    /// Field and query are equal
    Exact,
}

impl MatchKind {
    /// Classify `field` against `query`, ignoring case and surrounding whitespace.
    pub fn classify(field: &str, query: &str) -> Self {
        let field = field.trim().to_lowercase();
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return MatchKind::None;
        }

        if field == query {
            MatchKind::Exact
        } else if field.starts_with(&query) {
            MatchKind::Prefix
        } else if field.split_whitespace().skip(1).any(|word| word.starts_with(&query)) {
            MatchKind::WordPrefix
        } else if field.contains(&query) {
            MatchKind::Substring
        } else if fuzzy_match(&field, &query) {
            MatchKind::Fuzzy
        } else {
            MatchKind::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(MatchKind::classify("Lassi", " lassi "), MatchKind::Exact);
        assert_eq!(MatchKind::classify("Pav Bhaji", "pav"), MatchKind::Prefix);
        assert_eq!(MatchKind::classify("Aloo Tikki", "tik"), MatchKind::WordPrefix);
        assert_eq!(MatchKind::classify("Golgappe", "gapp"), MatchKind::Substring);
        assert_eq!(MatchKind::classify("Pav Bhaji", "pbj"), MatchKind::Fuzzy);
        assert_eq!(MatchKind::classify("Chai", "momo"), MatchKind::None);
    }

    #[test]
    fn test_ordering() {
        assert!(MatchKind::Exact > MatchKind::Prefix);
        assert!(MatchKind::Prefix > MatchKind::WordPrefix);
        assert!(MatchKind::WordPrefix > MatchKind::Substring);
        assert!(MatchKind::Substring > MatchKind::Fuzzy);
        assert!(MatchKind::Fuzzy > MatchKind::None);
    }

    #[test]
    fn test_blank_query() {
        assert_eq!(MatchKind::classify("Momos", "   "), MatchKind::None);
    }
}
