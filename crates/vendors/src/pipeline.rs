//! Vendor list -> approved only -> text match or radius filter -> ranked results.

use crate::error::{Result, VendorError};
use crate::model::Vendor;
use serde::Serialize;
use thelewale_core::config::SearchConfig;
use thelewale_geo::{Coordinate, DistanceLabel, RadiusFilter};
use thelewale_search::{FuzzyMatcher, MatchOptions};
use tracing::debug;

/// Keep only publicly visible vendors, in input order.
pub fn approved_only(vendors: Vec<Vendor>) -> Vec<Vendor> {
    vendors.into_iter().filter(Vendor::is_public).collect()
}

/// How candidates are selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "query", rename_all = "snake_case")]
pub enum SearchMode {
    /// Fuzzy match on name, description, cuisine and dish names
    Text(String),
    /// Within the configured radius of a position
    Near(Coordinate),
}

/// One entry of the result list.
#[derive(Debug, Clone, Serialize)]
pub struct RankedVendor {
    pub vendor: Vendor,
    /// Best-field similarity; `None` when no query ranked the list
    pub score: Option<f64>,
    /// Field text that produced the score
    pub matched: Option<String>,
    pub distance: DistanceLabel,
}

/// Filtered and ranked output, ready for display.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankedResultList {
    results: Vec<RankedVendor>,
}

impl RankedResultList {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedVendor> {
        self.results.iter()
    }

    /// Vendor ids in rank order.
    pub fn ids(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.vendor.id.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<RankedVendor> {
        self.results
    }
}

impl IntoIterator for RankedResultList {
    type Item = RankedVendor;
    type IntoIter = std::vec::IntoIter<RankedVendor>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedResultList {
    type Item = &'a RankedVendor;
    type IntoIter = std::slice::Iter<'a, RankedVendor>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// The search pipeline, configured once and run per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchPipeline {
    matcher: FuzzyMatcher,
    radius: RadiusFilter,
}

impl SearchPipeline {
    pub fn new(matcher: FuzzyMatcher, radius: RadiusFilter) -> Self {
        Self { matcher, radius }
    }

    /// Build from the `[search]` config section.
    ///
    /// # Errors
    /// A threshold outside 0.0..=1.0 or a non-positive radius.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let matcher = FuzzyMatcher::new(MatchOptions::with_threshold(config.threshold))?;
        for (name, value) in [("radius_km", config.radius_km), ("earth_radius_km", config.earth_radius_km)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(VendorError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        let radius = RadiusFilter::new(config.radius_km).with_earth_radius(config.earth_radius_km);
        Ok(Self { matcher, radius })
    }

    pub fn radius(&self) -> &RadiusFilter {
        &self.radius
    }

    pub fn matcher(&self) -> &FuzzyMatcher {
        &self.matcher
    }

    /// Display distance from the user, when both positions are known.
    pub fn distance_label(&self, user: Option<&Coordinate>, vendor: &Vendor) -> DistanceLabel {
        self.radius.label(user, vendor)
    }

    /// Run the pipeline over a full, unfiltered vendor list.
    ///
    /// Non-approved vendors never reach the matcher. `user` only feeds the display
    /// distance in text mode.
    ///
    /// # Errors
    /// An over-long query, or an invalid origin in location mode.
    pub fn run(&self, mode: &SearchMode, vendors: Vec<Vendor>, user: Option<&Coordinate>) -> Result<RankedResultList> {
        let total = vendors.len();
        let approved = approved_only(vendors);
        let candidates = approved.len();

        let results: Vec<RankedVendor> = match mode {
            SearchMode::Text(query) => {
                let ranked = !query.trim().is_empty();
                self.matcher
                    .search(query, approved)?
                    .into_iter()
                    .map(|hit| RankedVendor {
                        distance: self.distance_label(user, &hit.item),
                        vendor: hit.item,
                        score: ranked.then_some(hit.score),
                        matched: hit.matched,
                    })
                    .collect()
            }
            SearchMode::Near(origin) => self
                .radius
                .apply(origin, approved)?
                .into_iter()
                .map(|near| RankedVendor {
                    vendor: near.item,
                    score: None,
                    matched: None,
                    distance: DistanceLabel::Known(near.distance_km),
                })
                .collect(),
        };

        debug!(?mode, total, candidates, results = results.len(), "search pipeline ran");
        Ok(RankedResultList { results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dish, ModerationStatus};
    use chrono::Utc;
    use proptest::prelude::*;

    fn vendor(id: &str, name: &str, dishes: &[&str], location: Option<(f64, f64)>, status: ModerationStatus) -> Vendor {
        Vendor {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cuisine: String::new(),
            dishes: dishes.iter().map(|d| Dish::new(*d, 40.0)).collect(),
            images: Vec::new(),
            payment_methods: "Cash".into(),
            working_hours: String::new(),
            location: location.map(Coordinate::from),
            status,
            submitted_by: Some("u1".into()),
            created_at: Utc::now(),
        }
    }

    fn delhi() -> Coordinate {
        Coordinate::new(28.6139, 77.2090)
    }

    fn fixture() -> Vec<Vendor> {
        use ModerationStatus::*;
        vec![
            vendor("pitampura", "Sharma Chaat Bhandar", &["Pani Puri"], Some((28.7041, 77.1025)), Approved),
            vendor("pending", "Golgappa King", &["Pani Puri"], Some((28.6519, 77.1909)), Pending),
            vendor("karol-bagh", "Momo Point", &["Steamed Momos"], Some((28.6519, 77.1909)), Approved),
            vendor("nowhere", "Wandering Cart", &["Pani Puri"], None, Approved),
            vendor("jaipur", "Pink City Pyaaz Kachori", &["Kachori"], Some((26.9124, 75.7873)), Approved),
            vendor("rejected", "Closed Stall", &["Momos"], Some((28.6139, 77.2090)), Rejected),
        ]
    }

    #[test]
    fn test_approved_only() {
        let ids: Vec<String> = approved_only(fixture()).into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["pitampura", "karol-bagh", "nowhere", "jaipur"]);
    }

    #[test]
    fn test_text_mode_hides_unapproved() {
        let pipeline = SearchPipeline::default();
        let results = pipeline
            .run(&SearchMode::Text("pani puri".into()), fixture(), Some(&delhi()))
            .unwrap();

        assert_eq!(results.ids(), vec!["pitampura", "nowhere"]);
        assert!(results.iter().all(|r| r.score.unwrap() >= 0.7));
        assert!((results.iter().next().unwrap().distance.km().unwrap() - 14.44).abs() < 0.05);
        assert_eq!(results.iter().nth(1).unwrap().distance, DistanceLabel::Unavailable);
    }

    #[test]
    fn test_empty_query_lists_approved_unranked() {
        let results = SearchPipeline::default()
            .run(&SearchMode::Text("  ".into()), fixture(), None)
            .unwrap();
        assert_eq!(results.ids(), vec!["pitampura", "karol-bagh", "nowhere", "jaipur"]);
        assert!(results.iter().all(|r| r.score.is_none()));
        assert!(results.iter().all(|r| r.distance == DistanceLabel::Unavailable));
    }

    #[test]
    fn test_near_mode_nearest_first() {
        let results = SearchPipeline::default()
            .run(&SearchMode::Near(delhi()), fixture(), None)
            .unwrap();
        assert_eq!(results.ids(), vec!["karol-bagh", "pitampura"]);
    }

    #[test]
    fn test_near_mode_invalid_origin() {
        let err = SearchPipeline::default()
            .run(&SearchMode::Near(Coordinate::new(200.0, 0.0)), fixture(), None)
            .unwrap_err();
        assert!(matches!(err, VendorError::Geo(_)));
    }

    #[test]
    fn test_from_config() {
        let mut config = SearchConfig::default();
        config.radius_km = 5.0;
        let pipeline = SearchPipeline::from_config(&config).unwrap();
        let results = pipeline.run(&SearchMode::Near(delhi()), fixture(), None).unwrap();
        assert_eq!(results.ids(), vec!["karol-bagh"]);

        config.threshold = 2.0;
        assert!(matches!(SearchPipeline::from_config(&config), Err(VendorError::Search(_))));

        let mut config = SearchConfig::default();
        config.radius_km = -1.0;
        assert!(matches!(SearchPipeline::from_config(&config), Err(VendorError::Config(_))));
    }

    fn arb_status() -> impl Strategy<Value = ModerationStatus> {
        prop_oneof![
            Just(ModerationStatus::Pending),
            Just(ModerationStatus::Approved),
            Just(ModerationStatus::Rejected),
        ]
    }

    proptest! {
        #[test]
        fn prop_results_are_always_approved(
            statuses in proptest::collection::vec(arb_status(), 0..12),
            query in "[a-z ]{0,8}",
        ) {
            let vendors: Vec<Vendor> = statuses
                .iter()
                .enumerate()
                .map(|(i, status)| vendor(&i.to_string(), "Pani Puri Wala", &["Pani Puri"], Some((28.65, 77.19)), *status))
                .collect();
            let approved = statuses.iter().filter(|s| **s == ModerationStatus::Approved).count();

            let pipeline = SearchPipeline::default();
            let text = pipeline.run(&SearchMode::Text(query), vendors.clone(), None).unwrap();
            prop_assert!(text.iter().all(|r| r.vendor.status == ModerationStatus::Approved));

            let near = pipeline.run(&SearchMode::Near(delhi()), vendors, None).unwrap();
            prop_assert_eq!(near.len(), approved);
        }
    }
}
