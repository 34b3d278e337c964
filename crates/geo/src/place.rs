//! Place query parsing.
//!
//! The place search box carries either a free-text place name or the user's own
//! position rendered as `Lat: <lat>, Lng: <lng>`.

use crate::{Coordinate, GeoError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LAT_LNG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*lat\s*:\s*(?P<lat>[-+]?\d+(?:\.\d+)?)\s*,\s*lng\s*:\s*(?P<lng>[-+]?\d+(?:\.\d+)?)\s*$")
        .expect("static regex")
});

static BARE_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<lat>[-+]?\d+(?:\.\d+)?)\s*,\s*(?P<lng>[-+]?\d+(?:\.\d+)?)\s*$")
        .expect("static regex")
});

/// What the place search box asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaceQuery {
    /// An explicit position
    Coordinate(Coordinate),
    /// A place name to be geocoded
    Named(String),
}

impl PlaceQuery {
    /// Parse place text.
    ///
    /// `Lat: 28.61, Lng: 77.20` and a bare `28.61, 77.20` pair become coordinates;
    /// anything else is a place name.
    ///
    /// # Errors
    /// A coordinate-shaped query with out-of-range values is rejected rather than
    /// geocoded as text.
    ///
    /// # Example
    /// ```
    /// use thelewale_geo::{Coordinate, PlaceQuery};
    ///
    /// let query = PlaceQuery::parse("Lat: 28.6139, Lng: 77.209").unwrap();
    /// assert_eq!(query, PlaceQuery::Coordinate(Coordinate::new(28.6139, 77.209)));
    ///
    /// let named = PlaceQuery::parse("Chandni Chowk").unwrap();
    /// assert_eq!(named, PlaceQuery::Named("Chandni Chowk".into()));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let captures = LAT_LNG.captures(text).or_else(|| BARE_PAIR.captures(text));

        let Some(caps) = captures else {
            return Ok(PlaceQuery::Named(text.trim().to_string()));
        };

        let lat: f64 = caps["lat"]
            .parse()
            .map_err(|_| GeoError::InvalidPlace(text.to_string()))?;
        let lng: f64 = caps["lng"]
            .parse()
            .map_err(|_| GeoError::InvalidPlace(text.to_string()))?;

        Coordinate::try_new(lat, lng).map(PlaceQuery::Coordinate)
    }

    /// The coordinate, if the query already carries one.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            PlaceQuery::Coordinate(coord) => Some(*coord),
            PlaceQuery::Named(_) => None,
        }
    }
}

/// Render a position the way the place box shows a located user.
pub fn format_place_coordinate(coord: &Coordinate) -> String {
    format!("Lat: {}, Lng: {}", coord.latitude, coord.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lat_lng_label() {
        let query = PlaceQuery::parse("Lat: 28.6139, Lng: 77.2090").unwrap();
        assert_eq!(query.coordinate(), Some(Coordinate::new(28.6139, 77.2090)));
    }

    #[test]
    fn test_parse_is_case_and_space_tolerant() {
        let query = PlaceQuery::parse("  lat:-33.8688 ,LNG: 151.2093 ").unwrap();
        assert_eq!(query.coordinate(), Some(Coordinate::new(-33.8688, 151.2093)));
    }

    #[test]
    fn test_parse_bare_pair() {
        let query = PlaceQuery::parse("19.076, 72.8777").unwrap();
        assert_eq!(query.coordinate(), Some(Coordinate::new(19.076, 72.8777)));
    }

    #[test]
    fn test_parse_named_place() {
        let query = PlaceQuery::parse(" Sarojini Nagar ").unwrap();
        assert_eq!(query, PlaceQuery::Named("Sarojini Nagar".to_string()));
        assert_eq!(query.coordinate(), None);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(PlaceQuery::parse("Lat: 95.0, Lng: 77.0").is_err());
    }

    #[test]
    fn test_format_round_trips() {
        let coord = Coordinate::new(28.6139, 77.209);
        let text = format_place_coordinate(&coord);
        assert_eq!(text, "Lat: 28.6139, Lng: 77.209");
        assert_eq!(PlaceQuery::parse(&text).unwrap().coordinate(), Some(coord));
    }
}
