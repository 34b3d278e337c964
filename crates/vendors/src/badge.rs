//! Contributor badges.

use crate::error::{Result, VendorError};
use serde::{Deserialize, Serialize};
use thelewale_core::config::BadgeTierConfig;

/// One tier of the badge table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    pub min_points: i64,
    pub color: String,
}

impl From<&BadgeTierConfig> for Badge {
    fn from(tier: &BadgeTierConfig) -> Self {
        Self {
            name: tier.name.clone(),
            min_points: tier.min_points,
            color: tier.color.clone(),
        }
    }
}

/// Progress towards the next tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextBadge<'a> {
    pub badge: &'a Badge,
    pub points_needed: i64,
}

/// Ascending tiers; the first starts at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeTable {
    tiers: Vec<Badge>,
}

impl Default for BadgeTable {
    fn default() -> Self {
        let tiers = [
            ("Newbie", 0, "gray"),
            ("Contributor", 100, "blue"),
            ("Vendor Specialist", 250, "green"),
            ("Food Guru", 500, "yellow"),
        ]
        .into_iter()
        .map(|(name, min_points, color)| Badge {
            name: name.to_string(),
            min_points,
            color: color.to_string(),
        })
        .collect();
        Self { tiers }
    }
}

impl BadgeTable {
    /// Build from tiers.
    ///
    /// # Errors
    /// [`VendorError::Config`] if the table is empty, does not start at zero, or is
    /// not strictly ascending.
    pub fn new(tiers: Vec<Badge>) -> Result<Self> {
        match tiers.first() {
            None => return Err(VendorError::Config("badge table is empty".into())),
            Some(first) if first.min_points != 0 => {
                return Err(VendorError::Config(format!("badge `{}` must start at 0 points", first.name)));
            }
            Some(_) => {}
        }
        if tiers.windows(2).any(|pair| pair[1].min_points <= pair[0].min_points) {
            return Err(VendorError::Config("badge tiers must be strictly ascending".into()));
        }
        Ok(Self { tiers })
    }

    pub fn from_config(tiers: &[BadgeTierConfig]) -> Result<Self> {
        Self::new(tiers.iter().map(Badge::from).collect())
    }

    pub fn tiers(&self) -> &[Badge] {
        &self.tiers
    }

    /// Highest tier whose minimum does not exceed `points`.
    ///
    /// Missing or negative points get the lowest tier.
    ///
    /// # Example
    /// ```
    /// use thelewale_vendors::badge::BadgeTable;
    ///
    /// let table = BadgeTable::default();
    /// assert_eq!(table.badge_for(Some(250)).name, "Vendor Specialist");
    /// assert_eq!(table.badge_for(Some(99)).name, "Newbie");
    /// assert_eq!(table.badge_for(None).name, "Newbie");
    /// ```
    pub fn badge_for(&self, points: Option<i64>) -> &Badge {
        let points = points.unwrap_or(0).max(0);
        let reached = self.tiers.partition_point(|tier| tier.min_points <= points);
        &self.tiers[reached.saturating_sub(1)]
    }

    /// The tier after the current one, if any.
    pub fn next_badge(&self, points: Option<i64>) -> Option<NextBadge<'_>> {
        let points = points.unwrap_or(0).max(0);
        self.tiers
            .iter()
            .find(|tier| tier.min_points > points)
            .map(|badge| NextBadge {
                badge,
                points_needed: badge.min_points - points,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tier_boundaries() {
        let table = BadgeTable::default();
        assert_eq!(table.badge_for(Some(0)).name, "Newbie");
        assert_eq!(table.badge_for(Some(99)).name, "Newbie");
        assert_eq!(table.badge_for(Some(100)).name, "Contributor");
        assert_eq!(table.badge_for(Some(250)).name, "Vendor Specialist");
        assert_eq!(table.badge_for(Some(499)).name, "Vendor Specialist");
        assert_eq!(table.badge_for(Some(500)).name, "Food Guru");
        assert_eq!(table.badge_for(Some(10_000)).name, "Food Guru");
    }

    #[test]
    fn test_negative_or_missing_points() {
        let table = BadgeTable::default();
        assert_eq!(table.badge_for(Some(-40)).name, "Newbie");
        assert_eq!(table.badge_for(None).name, "Newbie");
    }

    #[test]
    fn test_next_badge() {
        let table = BadgeTable::default();
        let next = table.next_badge(Some(85)).unwrap();
        assert_eq!(next.badge.name, "Contributor");
        assert_eq!(next.points_needed, 15);
        assert!(table.next_badge(Some(500)).is_none());
    }

    #[test]
    fn test_from_default_config_matches_builtin() {
        let schema = thelewale_core::config::ConfigSchema::default();
        assert_eq!(BadgeTable::from_config(&schema.badges).unwrap(), BadgeTable::default());
    }

    #[test]
    fn test_invalid_tables() {
        assert!(BadgeTable::new(Vec::new()).is_err());

        let mut tiers = BadgeTable::default().tiers().to_vec();
        tiers.swap(1, 2);
        assert!(BadgeTable::new(tiers).is_err());

        let mut tiers = BadgeTable::default().tiers().to_vec();
        tiers[0].min_points = 10;
        assert!(BadgeTable::new(tiers).is_err());
    }

    proptest! {
        #[test]
        fn prop_badge_is_total_and_monotonic(a in any::<i64>(), b in any::<i64>()) {
            let table = BadgeTable::default();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low_badge = table.badge_for(Some(low));
            let high_badge = table.badge_for(Some(high));
            prop_assert!(low_badge.min_points <= high_badge.min_points);
            prop_assert!(low_badge.min_points <= low.max(0));
        }
    }
}
