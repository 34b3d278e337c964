//! Geospatial utilities for Thelewale.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Radius filtering of located items, nearest first
//! - Display labels for distances that may be unknown
//! - Parsing of `Lat: <lat>, Lng: <lng>` place queries
//!
//! # Example
//!
//! ```
//! use thelewale_geo::{haversine_distance, Coordinate};
//!
//! let connaught_place = Coordinate::new(28.6139, 77.2090);
//! let pitampura = Coordinate::new(28.7041, 77.1025);
//!
//! let distance_km = haversine_distance(&connaught_place, &pitampura);
//! assert!((distance_km - 14.44).abs() < 0.05);
//! ```

mod error;
mod haversine;
mod place;
pub mod radius;

pub use error::{GeoError, Result};
pub use haversine::{
    haversine_distance, haversine_distance_meters, haversine_distance_with_radius,
    EARTH_RADIUS_KM, EARTH_RADIUS_M,
};
pub use place::{format_place_coordinate, PlaceQuery};
pub use radius::{distance_label, DistanceLabel, Located, Nearby, RadiusFilter, DEFAULT_RADIUS_KM};

/// A geographic coordinate with latitude and longitude.
///
/// Serialized with the backend's field names (`lat`, `lng`); the long names are
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    #[serde(rename = "lng", alias = "longitude")]
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting out-of-range or non-finite values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!("({latitude}, {longitude})")))
        }
    }

    /// Returns true if the coordinate has valid values.
    ///
    /// NaN fails every comparison, so non-finite values are invalid too.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(28.6139, 77.2090);
        assert_eq!(coord.latitude, 28.6139);
        assert_eq!(coord.longitude, 77.2090);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(Coordinate::try_new(f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (28.6139, 77.2090).into();
        assert_eq!(coord.latitude, 28.6139);
    }

    #[test]
    fn test_coordinate_wire_names() {
        let coord: Coordinate = serde_json::from_str(r#"{"lat": 28.7041, "lng": 77.1025}"#).unwrap();
        assert_eq!(coord, Coordinate::new(28.7041, 77.1025));

        let long: Coordinate =
            serde_json::from_str(r#"{"latitude": 19.076, "longitude": 72.8777}"#).unwrap();
        assert_eq!(long.latitude, 19.076);

        let json = serde_json::to_string(&coord).unwrap();
        assert_eq!(json, r#"{"lat":28.7041,"lng":77.1025}"#);
    }
}
