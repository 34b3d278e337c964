//! Average star rating over a live review list.

use crate::model::Review;
use crate::store::Subscription;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean of the star ratings, `None` when there are none.
///
/// Reviews stored without a rating do not count.
///
/// # Example
/// ```
/// use thelewale_vendors::rating::average_rating;
///
/// assert_eq!(average_rating([5, 3, 4]), Some(4.0));
/// assert_eq!(average_rating(Vec::<u8>::new()), None);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn average_rating<I: IntoIterator<Item = u8>>(ratings: I) -> Option<f64> {
    let (sum, count) = ratings
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), rating| (sum + u64::from(rating), count + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

/// Rating figures shown next to a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: Option<f64>,
    /// Reviews that carry a rating
    pub rated: usize,
    /// All reviews, rated or not
    pub reviews: usize,
}

impl RatingSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let ratings: Vec<u8> = reviews.iter().filter_map(|review| review.rating).collect();
        Self {
            average: average_rating(ratings.iter().copied()),
            rated: ratings.len(),
            reviews: reviews.len(),
        }
    }
}

impl fmt::Display for RatingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.average {
            Some(average) => write!(
                f,
                "{average:.1} / 5 ({} rating{})",
                self.rated,
                if self.rated == 1 { "" } else { "s" }
            ),
            None => f.write_str("No ratings yet"),
        }
    }
}

/// Review feed that recomputes the summary on every push.
#[derive(Debug)]
pub struct RatingWatch {
    feed: Subscription<Vec<Review>>,
}

impl RatingWatch {
    pub fn new(feed: Subscription<Vec<Review>>) -> Self {
        Self { feed }
    }

    /// Next snapshot and its summary, `None` once the feed ends.
    pub async fn next(&mut self) -> Option<(Vec<Review>, RatingSummary)> {
        let reviews = self.feed.next().await?;
        let summary = RatingSummary::from_reviews(&reviews);
        Some((reviews, summary))
    }

    /// Stop watching.
    pub fn unsubscribe(self) {
        self.feed.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn review(rating: Option<u8>) -> Review {
        Review {
            id: "r".into(),
            vendor_id: "v".into(),
            content: "tasty".into(),
            rating,
            author: "Anonymous".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_average() {
        assert_eq!(average_rating([5, 3, 4]), Some(4.0));
        assert_eq!(average_rating([5, 4]), Some(4.5));
        assert_eq!(average_rating([]), None);
    }

    #[test]
    fn test_no_rating_is_distinct_from_zero() {
        let summary = RatingSummary::from_reviews(&[]);
        assert_eq!(summary.average, None);
        assert_eq!(summary.to_string(), "No ratings yet");
    }

    #[test]
    fn test_unrated_reviews_ignored() {
        let summary = RatingSummary::from_reviews(&[review(Some(5)), review(None), review(Some(2))]);
        assert_eq!(summary.average, Some(3.5));
        assert_eq!(summary.rated, 2);
        assert_eq!(summary.reviews, 3);
        assert_eq!(summary.to_string(), "3.5 / 5 (2 ratings)");
    }

    proptest! {
        #[test]
        fn prop_average_within_bounds(ratings in proptest::collection::vec(1u8..=5, 1..50)) {
            let average = average_rating(ratings.iter().copied()).unwrap();
            let min = f64::from(*ratings.iter().min().unwrap());
            let max = f64::from(*ratings.iter().max().unwrap());
            prop_assert!(average >= min && average <= max);
        }
    }
}
