//! Search requests carried in a results-page query string.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use thelewale_geo::{format_place_coordinate, PlaceQuery};

/// What the results page was asked to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "query", rename_all = "snake_case")]
pub enum SearchRequest {
    /// Free-text dish, cuisine or vendor search
    Dish(String),
    /// Vendors near a position or a named place
    Place(PlaceQuery),
    /// No search term; every approved vendor
    Browse,
}

impl SearchRequest {
    /// Parse `dish=..`, `place=..` or the legacy `search=..` parameter.
    ///
    /// A leading `?` is ignored. When several are present `dish` wins over `place`,
    /// and `place` over `search`. Blank values count as absent.
    ///
    /// # Errors
    /// A `place` that looks like `Lat: .., Lng: ..` but is out of range.
    ///
    /// # Example
    /// ```
    /// use thelewale_vendors::request::SearchRequest;
    ///
    /// let request = SearchRequest::from_query_string("?dish=pani%20puri").unwrap();
    /// assert_eq!(request, SearchRequest::Dish("pani puri".into()));
    /// ```
    pub fn from_query_string(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut dish = None;
        let mut place = None;
        let mut legacy = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim().to_string();
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "dish" => &mut dish,
                "place" => &mut place,
                "search" => &mut legacy,
                _ => continue,
            };
            slot.get_or_insert(value);
        }

        if let Some(dish) = dish {
            return Ok(SearchRequest::Dish(dish));
        }
        if let Some(place) = place {
            return Ok(SearchRequest::Place(PlaceQuery::parse(&place)?));
        }
        Ok(legacy.map_or(SearchRequest::Browse, SearchRequest::Dish))
    }

    /// Text to prefill the search box with.
    pub fn seed_text(&self) -> String {
        match self {
            SearchRequest::Dish(text) => text.clone(),
            SearchRequest::Place(PlaceQuery::Named(name)) => name.clone(),
            SearchRequest::Place(PlaceQuery::Coordinate(coord)) => format_place_coordinate(coord),
            SearchRequest::Browse => String::new(),
        }
    }

    /// Render back into a query string.
    pub fn to_query_string(&self) -> String {
        let mut out = url::form_urlencoded::Serializer::new(String::new());
        match self {
            SearchRequest::Dish(text) => {
                out.append_pair("dish", text);
            }
            SearchRequest::Place(_) => {
                out.append_pair("place", &self.seed_text());
            }
            SearchRequest::Browse => {}
        }
        out.finish()
    }
}
