//! Backend seams.
//!
//! Persistence, geocoding and the live review feed all live behind these traits so the
//! pipeline runs the same against the HTTP client and the in-memory backend.

use crate::error::StoreResult;
use crate::model::{ModerationStatus, NewReview, ProfileDelta, Review, UserProfile, Vendor, VendorSubmission};
use serde::{Deserialize, Serialize};
use std::future::Future;
use thelewale_geo::Coordinate;
use tokio::sync::mpsc;

/// Server-side equality filter on vendors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorFilter {
    /// `status == value`
    Status(ModerationStatus),
    /// `addedBy == value`
    SubmittedBy(String),
}

impl VendorFilter {
    /// Field name and value as the backend expects them.
    pub fn field_value(&self) -> (&'static str, &str) {
        match self {
            VendorFilter::Status(status) => ("status", status.as_str()),
            VendorFilter::SubmittedBy(user_id) => ("addedBy", user_id.as_str()),
        }
    }

    pub fn matches(&self, vendor: &Vendor) -> bool {
        match self {
            VendorFilter::Status(status) => vendor.status == *status,
            VendorFilter::SubmittedBy(user_id) => vendor.submitted_by.as_deref() == Some(user_id.as_str()),
        }
    }
}

/// Vendor collection.
pub trait VendorStore: Send + Sync {
    /// Every vendor, unfiltered.
    fn list_vendors(&self) -> impl Future<Output = StoreResult<Vec<Vendor>>> + Send;

    fn vendors_where(&self, filter: &VendorFilter) -> impl Future<Output = StoreResult<Vec<Vendor>>> + Send;

    /// `None` when no vendor has this id.
    fn get_vendor(&self, id: &str) -> impl Future<Output = StoreResult<Option<Vendor>>> + Send;

    fn create_vendor(&self, submission: &VendorSubmission) -> impl Future<Output = StoreResult<Vendor>> + Send;

    fn set_status(&self, id: &str, status: ModerationStatus) -> impl Future<Output = StoreResult<()>> + Send;

    fn delete_vendor(&self, id: &str) -> impl Future<Output = StoreResult<()>> + Send;
}

/// Per-vendor review collections.
pub trait ReviewStore: Send + Sync {
    /// Reviews of one vendor, newest first.
    fn list_reviews(&self, vendor_id: &str) -> impl Future<Output = StoreResult<Vec<Review>>> + Send;

    fn add_review(&self, review: &NewReview) -> impl Future<Output = StoreResult<Review>> + Send;

    fn delete_review(&self, vendor_id: &str, review_id: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Live feed of a vendor's reviews, newest first.
    ///
    /// The current snapshot is delivered first, then a fresh snapshot after every
    /// change. Dropping the subscription stops the feed.
    fn subscribe_reviews(
        &self,
        vendor_id: &str,
    ) -> impl Future<Output = StoreResult<Subscription<Vec<Review>>>> + Send;
}

/// User profiles.
pub trait UserStore: Send + Sync {
    fn get_user(&self, user_id: &str) -> impl Future<Output = StoreResult<Option<UserProfile>>> + Send;

    /// Apply the increments atomically.
    fn increment_user(&self, user_id: &str, delta: &ProfileDelta) -> impl Future<Output = StoreResult<()>> + Send;
}

/// A geocoder hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub display_name: String,
    pub coordinate: Coordinate,
}

/// Place name lookup.
pub trait Geocoder: Send + Sync {
    /// Best match for a place name, `None` when nothing matches.
    fn geocode(&self, place: &str) -> impl Future<Output = StoreResult<Option<Coordinate>>> + Send;

    /// Autocomplete candidates, at most `limit`.
    fn suggest(&self, query: &str, limit: usize) -> impl Future<Output = StoreResult<Vec<PlaceSuggestion>>> + Send;
}

/// Everything the vendor service needs from a backend.
pub trait Backend: VendorStore + ReviewStore + UserStore + Geocoder {}

impl<T: VendorStore + ReviewStore + UserStore + Geocoder> Backend for T {}

type Cancel = Box<dyn FnOnce() + Send>;

/// Receiving end of a live feed.
///
/// The feed is released when the subscription is dropped or [`unsubscribe`]d.
///
/// [`unsubscribe`]: Subscription::unsubscribe
pub struct Subscription<T> {
    receiver: mpsc::UnboundedReceiver<T>,
    cancel: Option<Cancel>,
}

impl<T> Subscription<T> {
    /// Wrap a channel; `cancel` runs exactly once when the subscription ends.
    pub fn new(receiver: mpsc::UnboundedReceiver<T>, cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            receiver,
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Next update, or `None` once the producer is gone.
    pub async fn next(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// An already delivered update, without waiting.
    pub fn try_next(&mut self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Stop the feed now.
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.receiver.close();
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_subscription_delivers_then_cancels_once() {
        let cancelled = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::unbounded_channel();
        let counter = cancelled.clone();
        let mut sub = Subscription::new(rx, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tx.send(1).unwrap();
        tx.send(2).unwrap();
        assert_eq!(sub.next().await, Some(1));
        assert_eq!(sub.try_next(), Some(2));
        assert_eq!(sub.try_next(), None);

        sub.unsubscribe();
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
        assert!(tx.send(3).is_err());
    }

    #[test]
    fn test_filter_field_value() {
        assert_eq!(
            VendorFilter::Status(ModerationStatus::Pending).field_value(),
            ("status", "pending")
        );
        assert_eq!(
            VendorFilter::SubmittedBy("u1".into()).field_value(),
            ("addedBy", "u1")
        );
    }
}
