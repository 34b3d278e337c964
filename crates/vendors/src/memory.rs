//! In-process backend.
//!
//! Behaves like the hosted backend (generated ids, newest-first review feeds,
//! atomic profile increments) and can be told to fail specific writes.

use crate::error::{StoreError, StoreResult};
use crate::model::{ModerationStatus, NewReview, ProfileDelta, Review, UserProfile, Vendor, VendorSubmission};
use crate::store::{
    Geocoder, PlaceSuggestion, ReviewStore, Subscription, UserStore, VendorFilter, VendorStore,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thelewale_geo::Coordinate;
use tokio::sync::mpsc;
use uuid::Uuid;

type Listener = (u64, mpsc::UnboundedSender<Vec<Review>>);

#[derive(Default)]
struct State {
    vendors: Vec<Vendor>,
    reviews: HashMap<String, Vec<Review>>,
    users: HashMap<String, UserProfile>,
    places: Vec<PlaceSuggestion>,
    listeners: HashMap<String, Vec<Listener>>,
    next_listener: u64,
    fail_user_updates: bool,
    fail_deletes: bool,
}

impl State {
    fn review_snapshot(&self, vendor_id: &str) -> Vec<Review> {
        let mut reviews: Vec<Review> = self
            .reviews
            .get(vendor_id)
            .map(|list| list.iter().rev().cloned().collect())
            .unwrap_or_default();
        // Stable, so equal timestamps keep latest-inserted first
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    }

    fn notify(&mut self, vendor_id: &str) {
        let snapshot = self.review_snapshot(vendor_id);
        if let Some(listeners) = self.listeners.get_mut(vendor_id) {
            listeners.retain(|(_, tx)| tx.send(snapshot.clone()).is_ok());
        }
    }
}

/// Backend kept entirely in memory.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<State>>,
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("InMemoryBackend")
            .field("vendors", &state.vendors.len())
            .field("users", &state.users.len())
            .finish_non_exhaustive()
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a vendor as-is.
    #[must_use]
    pub fn with_vendor(self, vendor: Vendor) -> Self {
        self.state().vendors.push(vendor);
        self
    }

    /// Seed a user profile.
    #[must_use]
    pub fn with_user(self, user: UserProfile) -> Self {
        self.state().users.insert(user.id.clone(), user);
        self
    }

    /// Seed a place the geocoder knows.
    #[must_use]
    pub fn with_place(self, name: impl Into<String>, coordinate: Coordinate) -> Self {
        self.state().places.push(PlaceSuggestion {
            display_name: name.into(),
            coordinate,
        });
        self
    }

    /// Make every profile increment fail until reset.
    pub fn fail_user_updates(&self, fail: bool) {
        self.state().fail_user_updates = fail;
    }

    /// Make every delete fail until reset.
    pub fn fail_deletes(&self, fail: bool) {
        self.state().fail_deletes = fail;
    }

    /// Open review feeds for a vendor.
    pub fn listener_count(&self, vendor_id: &str) -> usize {
        self.state().listeners.get(vendor_id).map_or(0, Vec::len)
    }

    /// Profile as currently stored.
    pub fn user(&self, user_id: &str) -> Option<UserProfile> {
        self.state().users.get(user_id).cloned()
    }

    /// Number of stored vendors, any status.
    pub fn vendor_count(&self) -> usize {
        self.state().vendors.len()
    }

    /// Number of stored reviews for a vendor.
    pub fn review_count(&self, vendor_id: &str) -> usize {
        self.state().reviews.get(vendor_id).map_or(0, Vec::len)
    }
}

impl VendorStore for InMemoryBackend {
    async fn list_vendors(&self) -> StoreResult<Vec<Vendor>> {
        Ok(self.state().vendors.clone())
    }

    async fn vendors_where(&self, filter: &VendorFilter) -> StoreResult<Vec<Vendor>> {
        Ok(self
            .state()
            .vendors
            .iter()
            .filter(|vendor| filter.matches(vendor))
            .cloned()
            .collect())
    }

    async fn get_vendor(&self, id: &str) -> StoreResult<Option<Vendor>> {
        Ok(self.state().vendors.iter().find(|vendor| vendor.id == id).cloned())
    }

    async fn create_vendor(&self, submission: &VendorSubmission) -> StoreResult<Vendor> {
        let vendor = submission.clone().into_vendor(Uuid::new_v4().to_string());
        self.state().vendors.push(vendor.clone());
        Ok(vendor)
    }

    async fn set_status(&self, id: &str, status: ModerationStatus) -> StoreResult<()> {
        let mut state = self.state();
        let vendor = state
            .vendors
            .iter_mut()
            .find(|vendor| vendor.id == id)
            .ok_or_else(|| StoreError::not_found("vendor", id))?;
        vendor.status = status;
        Ok(())
    }

    async fn delete_vendor(&self, id: &str) -> StoreResult<()> {
        let mut state = self.state();
        if state.fail_deletes {
            return Err(StoreError::Unavailable("delete refused".into()));
        }
        let before = state.vendors.len();
        state.vendors.retain(|vendor| vendor.id != id);
        if state.vendors.len() == before {
            return Err(StoreError::not_found("vendor", id));
        }
        state.reviews.remove(id);
        Ok(())
    }
}

impl ReviewStore for InMemoryBackend {
    async fn list_reviews(&self, vendor_id: &str) -> StoreResult<Vec<Review>> {
        Ok(self.state().review_snapshot(vendor_id))
    }

    async fn add_review(&self, review: &NewReview) -> StoreResult<Review> {
        let stored = review.clone().into_review(Uuid::new_v4().to_string());
        let mut state = self.state();
        state
            .reviews
            .entry(review.vendor_id.clone())
            .or_default()
            .push(stored.clone());
        state.notify(&review.vendor_id);
        Ok(stored)
    }

    async fn delete_review(&self, vendor_id: &str, review_id: &str) -> StoreResult<()> {
        let mut state = self.state();
        if state.fail_deletes {
            return Err(StoreError::Unavailable("delete refused".into()));
        }
        let reviews = state
            .reviews
            .get_mut(vendor_id)
            .ok_or_else(|| StoreError::not_found("review", review_id))?;
        let before = reviews.len();
        reviews.retain(|review| review.id != review_id);
        if reviews.len() == before {
            return Err(StoreError::not_found("review", review_id));
        }
        state.notify(vendor_id);
        Ok(())
    }

    async fn subscribe_reviews(&self, vendor_id: &str) -> StoreResult<Subscription<Vec<Review>>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = {
            let mut state = self.state();
            let id = state.next_listener;
            state.next_listener += 1;
            // Initial snapshot; the receiver is still alive so this cannot fail
            let _ = tx.send(state.review_snapshot(vendor_id));
            state
                .listeners
                .entry(vendor_id.to_string())
                .or_default()
                .push((id, tx));
            id
        };

        let shared = Arc::clone(&self.state);
        let vendor_id = vendor_id.to_string();
        Ok(Subscription::new(rx, move || {
            let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(listeners) = state.listeners.get_mut(&vendor_id) {
                listeners.retain(|(listener, _)| *listener != id);
                if listeners.is_empty() {
                    state.listeners.remove(&vendor_id);
                }
            }
        }))
    }
}

impl UserStore for InMemoryBackend {
    async fn get_user(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
        Ok(self.state().users.get(user_id).cloned())
    }

    async fn increment_user(&self, user_id: &str, delta: &ProfileDelta) -> StoreResult<()> {
        let mut state = self.state();
        if state.fail_user_updates {
            return Err(StoreError::Unavailable("profile update timed out".into()));
        }
        state
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile::new(user_id, ""))
            .apply(delta);
        Ok(())
    }
}

impl Geocoder for InMemoryBackend {
    async fn geocode(&self, place: &str) -> StoreResult<Option<Coordinate>> {
        Ok(self.suggest(place, 1).await?.first().map(|hit| hit.coordinate))
    }

    async fn suggest(&self, query: &str, limit: usize) -> StoreResult<Vec<PlaceSuggestion>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .state()
            .places
            .iter()
            .filter(|place| place.display_name.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewVendor;
    use chrono::{Duration, Utc};

    fn review(vendor_id: &str, rating: u8, minutes_ago: i64) -> NewReview {
        NewReview {
            vendor_id: vendor_id.into(),
            content: format!("{rating} stars"),
            rating,
            author: "Asha".into(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn test_reviews_newest_first() {
        let backend = InMemoryBackend::new();
        backend.add_review(&review("v1", 3, 10)).await.unwrap();
        backend.add_review(&review("v1", 5, 0)).await.unwrap();
        backend.add_review(&review("v1", 4, 5)).await.unwrap();

        let ratings: Vec<Option<u8>> = backend
            .list_reviews("v1")
            .await
            .unwrap()
            .iter()
            .map(|r| r.rating)
            .collect();
        assert_eq!(ratings, vec![Some(5), Some(4), Some(3)]);
    }

    #[tokio::test]
    async fn test_subscription_snapshot_and_updates() {
        let backend = InMemoryBackend::new();
        backend.add_review(&review("v1", 4, 1)).await.unwrap();

        let mut feed = backend.subscribe_reviews("v1").await.unwrap();
        assert_eq!(feed.next().await.unwrap().len(), 1);

        backend.add_review(&review("v1", 2, 0)).await.unwrap();
        let update = feed.next().await.unwrap();
        assert_eq!(update.len(), 2);
        assert_eq!(update[0].rating, Some(2));

        // Other vendors do not wake this feed
        backend.add_review(&review("v2", 5, 0)).await.unwrap();
        assert!(feed.try_next().is_none());
    }

    #[tokio::test]
    async fn test_drop_releases_listener() {
        let backend = InMemoryBackend::new();
        let first = backend.subscribe_reviews("v1").await.unwrap();
        let second = backend.subscribe_reviews("v1").await.unwrap();
        assert_eq!(backend.listener_count("v1"), 2);

        drop(first);
        assert_eq!(backend.listener_count("v1"), 1);
        second.unsubscribe();
        assert_eq!(backend.listener_count("v1"), 0);
    }

    #[tokio::test]
    async fn test_vendor_crud_and_filters() {
        let backend = InMemoryBackend::new();
        let submission = NewVendor {
            name: "Momo Point".into(),
            ..NewVendor::default()
        }
        .into_submission("u1", Utc::now());

        let created = backend.create_vendor(&submission).await.unwrap();
        let pending = backend
            .vendors_where(&VendorFilter::Status(ModerationStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);

        backend.set_status(&created.id, ModerationStatus::Approved).await.unwrap();
        let mine = backend
            .vendors_where(&VendorFilter::SubmittedBy("u1".into()))
            .await
            .unwrap();
        assert_eq!(mine[0].status, ModerationStatus::Approved);

        backend.delete_vendor(&created.id).await.unwrap();
        assert!(backend.get_vendor(&created.id).await.unwrap().is_none());
        assert!(matches!(
            backend.delete_vendor(&created.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_increment_and_injected_failure() {
        let backend = InMemoryBackend::new().with_user(UserProfile::new("u1", "Asha"));
        backend.increment_user("u1", &ProfileDelta::review_given(10)).await.unwrap();
        assert_eq!(backend.user("u1").unwrap().points, 10);

        backend.fail_user_updates(true);
        assert!(backend.increment_user("u1", &ProfileDelta::review_given(10)).await.is_err());
        assert_eq!(backend.user("u1").unwrap().points, 10);
    }

    #[tokio::test]
    async fn test_geocoder_lookup() {
        let backend = InMemoryBackend::new()
            .with_place("Chandni Chowk, Delhi", Coordinate::new(28.6506, 77.2303))
            .with_place("Chandigarh", Coordinate::new(30.7333, 76.7794));

        assert_eq!(backend.suggest("chand", 5).await.unwrap().len(), 2);
        assert_eq!(backend.suggest("chand", 1).await.unwrap().len(), 1);
        assert_eq!(
            backend.geocode("chowk").await.unwrap(),
            Some(Coordinate::new(28.6506, 77.2303))
        );
        assert_eq!(backend.geocode("Atlantis").await.unwrap(), None);
    }
}
