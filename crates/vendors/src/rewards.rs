//! Points awarded for contributions.

use crate::model::ProfileDelta;
use serde::{Deserialize, Serialize};
use thelewale_core::config::RewardsConfig;

/// Fixed point values per contribution kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub vendor_submission: i64,
    pub review: i64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            vendor_submission: 75,
            review: 10,
        }
    }
}

impl From<&RewardsConfig> for Rewards {
    fn from(config: &RewardsConfig) -> Self {
        Self {
            vendor_submission: config.vendor_submission,
            review: config.review,
        }
    }
}

impl Rewards {
    /// Increment for a newly submitted vendor.
    pub fn for_vendor(&self) -> ProfileDelta {
        ProfileDelta::vendor_added(self.vendor_submission)
    }

    /// Increment for a newly posted review.
    pub fn for_review(&self) -> ProfileDelta {
        ProfileDelta::review_given(self.review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rewards() {
        let rewards = Rewards::default();
        assert_eq!(rewards.for_vendor().points, 75);
        assert_eq!(rewards.for_vendor().vendors_added, 1);
        assert_eq!(rewards.for_review().points, 10);
        assert_eq!(rewards.for_review().reviews_given, 1);
        assert_eq!(Rewards::from(&RewardsConfig::default()), rewards);
    }
}
