//! Radius filtering and distance labels.
//!
//! Items without a usable coordinate never appear in a radius result; they are
//! neither an error nor treated as distance zero.

use crate::{haversine_distance_with_radius, Coordinate, GeoError, Result, EARTH_RADIUS_KM};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default search radius in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 30.0;

/// Anything that may carry a stored position.
pub trait Located {
    /// The stored coordinate, if any.
    fn coordinate(&self) -> Option<Coordinate>;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Option<Coordinate> {
        Some(*self)
    }
}

impl Located for Option<Coordinate> {
    fn coordinate(&self) -> Option<Coordinate> {
        *self
    }
}

impl<T: Located> Located for &T {
    fn coordinate(&self) -> Option<Coordinate> {
        (**self).coordinate()
    }
}

/// An item paired with its distance from the search origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nearby<T> {
    /// The located item
    pub item: T,
    /// Great-circle distance in kilometers
    pub distance_km: f64,
}

/// Keeps items within a fixed great-circle radius of an origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusFilter {
    /// Inclusive radius in kilometers
    pub radius_km: f64,
    /// Sphere radius used for the haversine formula
    pub earth_radius_km: f64,
}

impl Default for RadiusFilter {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            earth_radius_km: EARTH_RADIUS_KM,
        }
    }
}

impl RadiusFilter {
    /// Create a filter with the given radius on the standard Earth sphere.
    pub fn new(radius_km: f64) -> Self {
        Self {
            radius_km,
            ..Self::default()
        }
    }

    /// Override the sphere radius.
    #[must_use]
    pub fn with_earth_radius(mut self, earth_radius_km: f64) -> Self {
        self.earth_radius_km = earth_radius_km;
        self
    }

    /// Distance between two coordinates on this filter's sphere.
    #[inline]
    pub fn distance(&self, from: &Coordinate, to: &Coordinate) -> f64 {
        haversine_distance_with_radius(from, to, self.earth_radius_km)
    }

    /// Distance from `origin` to an item, `None` when the item has no valid coordinate.
    #[inline]
    pub fn distance_to<T: Located>(&self, origin: &Coordinate, item: &T) -> Option<f64> {
        item.coordinate()
            .filter(Coordinate::is_valid)
            .map(|coord| self.distance(origin, &coord))
    }

    /// Display distance on this filter's sphere, when both positions are usable.
    pub fn label<T: Located>(&self, user: Option<&Coordinate>, item: &T) -> DistanceLabel {
        user.filter(|u| u.is_valid())
            .and_then(|u| self.distance_to(u, item))
            .map_or(DistanceLabel::Unavailable, DistanceLabel::Known)
    }

    /// Keep the items within the radius of `origin`, nearest first.
    ///
    /// Items at equal distance keep their input order.
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidCoordinate`] when `origin` itself is not valid.
    ///
    /// # Example
    /// ```
    /// use thelewale_geo::{Coordinate, RadiusFilter};
    ///
    /// let user = Coordinate::new(28.6139, 77.2090);
    /// let stalls = vec![
    ///     Some(Coordinate::new(28.7041, 77.1025)), // Pitampura, ~14 km
    ///     None,                                    // no stored location
    ///     Some(Coordinate::new(27.1767, 78.0081)), // Agra, ~180 km
    /// ];
    ///
    /// let nearby = RadiusFilter::default().apply(&user, stalls).unwrap();
    /// assert_eq!(nearby.len(), 1);
    /// ```
    pub fn apply<T: Located + Sync>(&self, origin: &Coordinate, items: Vec<T>) -> Result<Vec<Nearby<T>>> {
        if !origin.is_valid() {
            return Err(GeoError::InvalidCoordinate(format!(
                "search origin ({}, {})",
                origin.latitude, origin.longitude
            )));
        }

        let distances = self.distances(origin, &items);

        let mut results: Vec<Nearby<T>> = items
            .into_iter()
            .zip(distances)
            .filter_map(|(item, distance)| match distance {
                Some(distance_km) if distance_km <= self.radius_km => Some(Nearby { item, distance_km }),
                _ => None,
            })
            .collect();

        // Stable sort keeps input order for ties
        results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        Ok(results)
    }

    fn distances<T: Located + Sync>(&self, origin: &Coordinate, items: &[T]) -> Vec<Option<f64>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            items
                .par_iter()
                .map(|item| self.distance_to(origin, item))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            items
                .iter()
                .map(|item| self.distance_to(origin, item))
                .collect()
        }
    }
}

/// A distance for display, or an explicit marker that it cannot be known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "km", rename_all = "snake_case")]
pub enum DistanceLabel {
    /// Both positions known
    Known(f64),
    /// User or vendor position missing
    Unavailable,
}

impl DistanceLabel {
    /// The numeric distance, if known.
    pub fn km(&self) -> Option<f64> {
        match self {
            DistanceLabel::Known(km) => Some(*km),
            DistanceLabel::Unavailable => None,
        }
    }
}

impl fmt::Display for DistanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceLabel::Known(km) if *km < 1.0 => write!(f, "{:.0} m", km * 1000.0),
            DistanceLabel::Known(km) => write!(f, "{km:.1} km"),
            DistanceLabel::Unavailable => f.write_str("Location unavailable"),
        }
    }
}

/// Display distance between an optional user position and an optional vendor position.
///
/// Always measured on the mean Earth sphere ([`EARTH_RADIUS_KM`]); use
/// [`RadiusFilter::label`] for a configured sphere.
pub fn distance_label(user: Option<&Coordinate>, vendor: Option<&Coordinate>) -> DistanceLabel {
    RadiusFilter::default().label(user, &vendor.copied())
}
