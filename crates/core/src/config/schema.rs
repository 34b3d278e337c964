//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSchema {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub rewards: RewardsConfig,

    #[serde(default = "default_badges")]
    pub badges: Vec<BadgeTierConfig>,

    #[serde(default)]
    pub location: LocationConfig,
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            rewards: RewardsConfig::default(),
            badges: default_badges(),
            location: LocationConfig::default(),
        }
    }
}

impl ConfigSchema {
    /// Check value ranges and the badge table ordering
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if !(0.0..=1.0).contains(&search.threshold) {
            return Err(Error::invalid_config_value(
                "search.threshold",
                format!("{} is outside 0.0..=1.0", search.threshold),
            ));
        }
        if !(search.radius_km.is_finite() && search.radius_km > 0.0) {
            return Err(Error::invalid_config_value(
                "search.radius_km",
                "must be a positive number of kilometres",
            ));
        }
        if !(search.earth_radius_km.is_finite() && search.earth_radius_km > 0.0) {
            return Err(Error::invalid_config_value(
                "search.earth_radius_km",
                "must be a positive number of kilometres",
            ));
        }

        let Some(first) = self.badges.first() else {
            return Err(Error::invalid_config_value("badges", "at least one tier is required"));
        };
        if first.min_points != 0 {
            return Err(Error::invalid_config_value(
                "badges",
                format!("the first tier `{}` must start at 0 points", first.name),
            ));
        }
        for pair in self.badges.windows(2) {
            if pair[1].min_points <= pair[0].min_points {
                return Err(Error::invalid_config_value(
                    "badges",
                    format!(
                        "tier `{}` ({}) must require more points than `{}` ({})",
                        pair[1].name, pair[1].min_points, pair[0].name, pair[0].min_points
                    ),
                ));
            }
        }

        let location = &self.location;
        if !(-90.0..=90.0).contains(&location.default_latitude)
            || !(-180.0..=180.0).contains(&location.default_longitude)
        {
            return Err(Error::invalid_config_value(
                "location",
                "default coordinate is out of range",
            ));
        }

        Ok(())
    }
}

/// Vendor search tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum tolerated normalized edit distance (0.0 exact, 1.0 anything)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Radius for location searches
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,

    /// Sphere radius used by the haversine formula
    #[serde(default = "default_earth_radius_km")]
    pub earth_radius_km: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            radius_km: default_radius_km(),
            earth_radius_km: default_earth_radius_km(),
        }
    }
}

fn default_threshold() -> f64 {
    0.3
}

fn default_radius_km() -> f64 {
    30.0
}

fn default_earth_radius_km() -> f64 {
    6371.0
}

/// Points awarded for contributions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RewardsConfig {
    #[serde(default = "default_vendor_points")]
    pub vendor_submission: i64,

    #[serde(default = "default_review_points")]
    pub review: i64,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            vendor_submission: default_vendor_points(),
            review: default_review_points(),
        }
    }
}

fn default_vendor_points() -> i64 {
    75
}

fn default_review_points() -> i64 {
    10
}

/// One row of the badge table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeTierConfig {
    pub name: String,
    pub min_points: i64,
    /// Display color name (gray, blue, green, yellow, ...)
    #[serde(default = "default_badge_color")]
    pub color: String,
}

impl BadgeTierConfig {
    fn new(name: &str, min_points: i64, color: &str) -> Self {
        Self {
            name: name.to_string(),
            min_points,
            color: color.to_string(),
        }
    }
}

fn default_badge_color() -> String {
    "gray".to_string()
}

fn default_badges() -> Vec<BadgeTierConfig> {
    vec![
        BadgeTierConfig::new("Newbie", 0, "gray"),
        BadgeTierConfig::new("Contributor", 100, "blue"),
        BadgeTierConfig::new("Vendor Specialist", 250, "green"),
        BadgeTierConfig::new("Food Guru", 500, "yellow"),
    ]
}

/// Fallback when the user's position is unknown
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,

    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
        }
    }
}

// New Delhi
fn default_latitude() -> f64 {
    28.6139
}

fn default_longitude() -> f64 {
    77.2090
}
