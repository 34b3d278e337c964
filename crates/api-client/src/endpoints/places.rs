//! Nominatim geocoder

use crate::client::ThelewaleClient;
use crate::error::{ApiError, ApiResult};
use serde::Deserialize;
use thelewale_geo::Coordinate;
use thelewale_vendors::PlaceSuggestion;

/// Geocoder API interface
#[derive(Clone)]
pub struct PlacesApi {
    client: ThelewaleClient,
}

/// One Nominatim search hit; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

impl TryFrom<NominatimPlace> for PlaceSuggestion {
    type Error = ApiError;

    fn try_from(place: NominatimPlace) -> ApiResult<Self> {
        let parse = |value: &str, field: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| ApiError::Unexpected(format!("{field} `{value}` for {}", place.display_name)))
        };
        let coordinate = Coordinate::try_new(parse(&place.lat, "lat")?, parse(&place.lon, "lon")?)
            .map_err(|e| ApiError::Unexpected(e.to_string()))?;
        Ok(PlaceSuggestion {
            display_name: place.display_name,
            coordinate,
        })
    }
}

impl PlacesApi {
    pub(crate) fn new(client: ThelewaleClient) -> Self {
        Self { client }
    }

    /// GET {geocoder}/search?q=..&format=json&limit=..
    pub async fn search(&self, query: &str, limit: usize) -> ApiResult<Vec<PlaceSuggestion>> {
        let limit = limit.to_string();
        let url = self.client.external_url(
            &self.client.config().geocoder_url,
            "search",
            &[("q", query), ("format", "json"), ("limit", limit.as_str())],
        )?;
        let places: Vec<NominatimPlace> = self.client.get_url(&url).await?;
        parse_places(places)
    }

    /// Best match for a place name
    pub async fn geocode(&self, place: &str) -> ApiResult<Option<Coordinate>> {
        Ok(self.search(place, 1).await?.first().map(|hit| hit.coordinate))
    }
}

fn parse_places(places: Vec<NominatimPlace>) -> ApiResult<Vec<PlaceSuggestion>> {
    places.into_iter().map(PlaceSuggestion::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominatim_response() {
        let places: Vec<NominatimPlace> = serde_json::from_str(
            r#"[
                {"place_id": 1, "lat": "28.6505", "lon": "77.2303", "display_name": "Chandni Chowk, Delhi, India", "type": "suburb"},
                {"place_id": 2, "lat": "30.7333", "lon": "76.7794", "display_name": "Chandigarh, India"}
            ]"#,
        )
        .unwrap();
        let hits = parse_places(places).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].display_name, "Chandni Chowk, Delhi, India");
        assert_eq!(hits[0].coordinate, Coordinate::new(28.6505, 77.2303));
    }

    #[test]
    fn test_bad_coordinate_rejected() {
        let places: Vec<NominatimPlace> =
            serde_json::from_str(r#"[{"lat": "north", "lon": "77.2", "display_name": "Nowhere"}]"#).unwrap();
        assert!(matches!(parse_places(places), Err(ApiError::Unexpected(_))));
    }
}
