//! The HTTP client as a vendor backend.

use crate::client::ThelewaleClient;
use crate::error::ApiError;
use thelewale_geo::Coordinate;
use thelewale_vendors::weather::WeatherSource;
use thelewale_vendors::{
    CurrentWeather, Geocoder, ModerationStatus, NewReview, PlaceSuggestion, ProfileDelta, Review, ReviewStore,
    StoreError, StoreResult, Subscription, UserProfile, UserStore, Vendor, VendorFilter, VendorStore,
    VendorSubmission,
};

/// Map a 404 to [`StoreError::NotFound`], anything else as usual.
fn missing(kind: &'static str, id: &str) -> impl FnOnce(ApiError) -> StoreError {
    let id = id.to_string();
    move |err| {
        if err.is_not_found() {
            StoreError::not_found(kind, id)
        } else {
            err.into()
        }
    }
}

impl VendorStore for ThelewaleClient {
    async fn list_vendors(&self) -> StoreResult<Vec<Vendor>> {
        Ok(self.vendors().list().await?)
    }

    async fn vendors_where(&self, filter: &VendorFilter) -> StoreResult<Vec<Vendor>> {
        Ok(self.vendors().list_where(filter).await?)
    }

    async fn get_vendor(&self, id: &str) -> StoreResult<Option<Vendor>> {
        Ok(self.vendors().get(id).await?)
    }

    async fn create_vendor(&self, submission: &VendorSubmission) -> StoreResult<Vendor> {
        Ok(self.vendors().create(submission).await?)
    }

    async fn set_status(&self, id: &str, status: ModerationStatus) -> StoreResult<()> {
        self.vendors().set_status(id, status).await.map_err(missing("vendor", id))
    }

    async fn delete_vendor(&self, id: &str) -> StoreResult<()> {
        self.vendors().delete(id).await.map_err(missing("vendor", id))
    }
}

impl ReviewStore for ThelewaleClient {
    async fn list_reviews(&self, vendor_id: &str) -> StoreResult<Vec<Review>> {
        self.reviews().list(vendor_id).await.map_err(missing("vendor", vendor_id))
    }

    async fn add_review(&self, review: &NewReview) -> StoreResult<Review> {
        self.reviews()
            .add(review)
            .await
            .map_err(missing("vendor", &review.vendor_id))
    }

    async fn delete_review(&self, vendor_id: &str, review_id: &str) -> StoreResult<()> {
        self.reviews()
            .delete(vendor_id, review_id)
            .await
            .map_err(missing("review", review_id))
    }

    async fn subscribe_reviews(&self, vendor_id: &str) -> StoreResult<Subscription<Vec<Review>>> {
        self.reviews()
            .subscribe(vendor_id)
            .await
            .map_err(missing("vendor", vendor_id))
    }
}

impl UserStore for ThelewaleClient {
    async fn get_user(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
        Ok(self.users().get(user_id).await?)
    }

    async fn increment_user(&self, user_id: &str, delta: &ProfileDelta) -> StoreResult<()> {
        Ok(self.users().increment(user_id, delta).await?)
    }
}

impl Geocoder for ThelewaleClient {
    async fn geocode(&self, place: &str) -> StoreResult<Option<Coordinate>> {
        Ok(self.places().geocode(place).await?)
    }

    async fn suggest(&self, query: &str, limit: usize) -> StoreResult<Vec<PlaceSuggestion>> {
        Ok(self.places().search(query, limit).await?)
    }
}

impl WeatherSource for ThelewaleClient {
    async fn current(&self, at: &Coordinate) -> StoreResult<CurrentWeather> {
        Ok(self.weather().current(at).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_maps_404_to_not_found() {
        let err = missing("vendor", "v1")(ApiError::api_response(404, "no such vendor"));
        assert!(matches!(err, StoreError::NotFound { kind: "vendor", ref id } if id == "v1"));

        let err = missing("vendor", "v1")(ApiError::api_response(500, "boom"));
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_client_is_a_backend() {
        fn assert_backend<B: thelewale_vendors::Backend + WeatherSource>() {}
        assert_backend::<ThelewaleClient>();
    }
}
