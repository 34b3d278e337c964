//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a specific set of endpoints.
//!
//! | Module | Service | Description |
//! |--------|---------|-------------|
//! | `vendors` | backend `vendors` | Vendor listings and moderation status |
//! | `reviews` | backend `vendors/{id}/reviews` | Reviews and the polled review feed |
//! | `users` | backend `users` | Contributor profiles and point increments |
//! | `places` | Nominatim `search` | Place name lookup and autocomplete |
//! | `weather` | Open-Meteo `forecast` | Current temperature and humidity |

pub mod places;
pub mod reviews;
pub mod users;
pub mod vendors;
pub mod weather;

pub use places::PlacesApi;
pub use reviews::ReviewsApi;
pub use users::UsersApi;
pub use vendors::VendorsApi;
pub use weather::WeatherApi;

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("abc123"), "abc123");
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }
}
