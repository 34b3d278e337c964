//! Fuzzy matching algorithms.

use unicode_segmentation::UnicodeSegmentation;

/// Calculate Levenshtein edit distance between two strings.
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    // Use two rows for space optimization
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Smallest edit distance between `pattern` and any substring of `text`.
///
/// Leading and trailing text is free, so `"puri"` against `"pani puri wala"` is 0 and
/// `"poori"` against the same text is 1.
pub fn substring_distance(pattern: &str, text: &str) -> usize {
    let p: Vec<char> = pattern.chars().collect();
    let m = p.len();
    if m == 0 {
        return 0;
    }

    // col[i]: best cost of matching the first i pattern chars ending at the current text char
    let mut col: Vec<usize> = (0..=m).collect();
    let mut next = vec![0; m + 1];
    let mut best = m;

    for c in text.chars() {
        next[0] = 0;
        for i in 1..=m {
            let cost = usize::from(p[i - 1] != c);
            next[i] = (col[i] + 1)
                .min(next[i - 1] + 1)
                .min(col[i - 1] + cost);
        }
        best = best.min(next[m]);
        std::mem::swap(&mut col, &mut next);
    }

    best
}

/// Similarity of `token` to the closest part of `text`, from 0.0 to 1.0.
///
/// Both inputs are expected to be lowercased already. An empty token is a perfect match.
#[allow(clippy::cast_precision_loss)]
pub fn similarity(token: &str, text: &str) -> f64 {
    let len = token.chars().count();
    if len == 0 || text.contains(token) {
        return 1.0;
    }
    let distance = substring_distance(token, text);
    (1.0 - distance as f64 / len as f64).max(0.0)
}

/// Lowercased words of `text`.
///
/// Text made only of punctuation yields its trimmed, lowercased self so that a
/// query like `"???"` still has something to match.
pub fn tokenize(text: &str) -> Vec<String> {
    let words: Vec<String> = text.unicode_words().map(str::to_lowercase).collect();
    if words.is_empty() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        return vec![trimmed.to_lowercase()];
    }
    words
}

/// Check if text contains all characters of query in order.
///
/// All query characters must appear in the text in the same order, though not
/// necessarily consecutively.
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    let mut text_chars = text.chars();

    for query_char in query.chars() {
        loop {
            match text_chars.next() {
                Some(c) if c == query_char => break,
                Some(_) => {}
                None => return false,
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("samosa", "samosa"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein_distance("momos", "momas"), 1);
    }

    #[test]
    fn test_levenshtein_insert_delete() {
        assert_eq!(levenshtein_distance("chai", "chaai"), 1);
        assert_eq!(levenshtein_distance("chaai", "chai"), 1);
    }

    #[test]
    fn test_substring_distance_exact_inside() {
        assert_eq!(substring_distance("puri", "pani puri wala"), 0);
    }

    #[test]
    fn test_substring_distance_typo_inside() {
        assert_eq!(substring_distance("poori", "pani puri wala"), 1);
        assert_eq!(substring_distance("bhature", "chole bhatura"), 1);
    }

    #[test]
    fn test_substring_distance_unrelated() {
        assert_eq!(substring_distance("xyz", "chai"), 3);
        assert_eq!(substring_distance("", "chai"), 0);
        assert_eq!(substring_distance("chai", ""), 4);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("tikki", "aloo tikki"), 1.0);
        assert!((similarity("samsa", "samosa") - 0.8).abs() < 1e-9);
        assert_eq!(similarity("zzzz", "chai"), 0.0);
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Pani-Puri  Wala"), vec!["pani", "puri", "wala"]);
        assert_eq!(tokenize("   "), Vec::<String>::new());
        assert_eq!(tokenize(" ?! "), vec!["?!"]);
    }

    #[test]
    fn test_fuzzy_match_true() {
        assert!(fuzzy_match("pav bhaji", "pbj"));
    }

    #[test]
    fn test_fuzzy_match_false() {
        assert!(!fuzzy_match("chai", "iah"));
    }

    proptest! {
        #[test]
        fn prop_substring_never_exceeds_levenshtein(a in "[a-z]{0,8}", b in "[a-z]{0,12}") {
            prop_assert!(substring_distance(&a, &b) <= levenshtein_distance(&a, &b));
        }

        #[test]
        fn prop_similarity_in_unit_range(a in "[a-z]{1,8}", b in "[a-z ]{0,20}") {
            let s = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s));
        }
    }
}
