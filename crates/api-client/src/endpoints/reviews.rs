//! Review endpoints and the polled review feed

use super::segment;
use crate::client::ThelewaleClient;
use crate::error::ApiResult;
use thelewale_vendors::{NewReview, Review, Subscription};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Review API interface
#[derive(Clone)]
pub struct ReviewsApi {
    client: ThelewaleClient,
}

impl ReviewsApi {
    pub(crate) fn new(client: ThelewaleClient) -> Self {
        Self { client }
    }

    /// GET /vendors/{id}/reviews, newest first
    pub async fn list(&self, vendor_id: &str) -> ApiResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .client
            .get(&format!("vendors/{}/reviews?orderBy=createdAt&direction=desc", segment(vendor_id)))
            .await?;
        newest_first(&mut reviews);
        Ok(reviews)
    }

    /// POST /vendors/{id}/reviews
    pub async fn add(&self, review: &NewReview) -> ApiResult<Review> {
        self.client
            .post(&format!("vendors/{}/reviews", segment(&review.vendor_id)), review)
            .await
    }

    /// DELETE /vendors/{id}/reviews/{review_id}
    pub async fn delete(&self, vendor_id: &str, review_id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("vendors/{}/reviews/{}", segment(vendor_id), segment(review_id)))
            .await
    }

    /// Live review feed.
    ///
    /// The first snapshot is fetched before returning, so a failing backend fails the
    /// subscribe call. Afterwards the list is polled every `poll_interval` and a new
    /// snapshot is pushed only when it changed. Poll errors are logged and retried on
    /// the next tick. Dropping the subscription stops the polling task.
    pub async fn subscribe(&self, vendor_id: &str) -> ApiResult<Subscription<Vec<Review>>> {
        let initial = self.list(vendor_id).await?;
        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver is held below, so the first send cannot fail
        let _ = tx.send(initial.clone());

        let api = self.clone();
        let vendor_id = vendor_id.to_string();
        let interval = self.client.config().poll_interval;

        let task = tokio::spawn(async move {
            let mut last = initial;
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }
                match api.list(&vendor_id).await {
                    Ok(polled) => {
                        if let Some(update) = changed(&mut last, polled) {
                            if tx.send(update).is_err() {
                                break;
                            }
                        }
                    }
                    Err(e) => warn!(vendor_id = %vendor_id, error = %e, "Review poll failed"),
                }
            }
            debug!(vendor_id = %vendor_id, "Review feed stopped");
        });

        Ok(abort_on_drop(rx, task))
    }
}

/// Keep `polled` as the latest snapshot and return it when it differs from `last`.
fn changed(last: &mut Vec<Review>, polled: Vec<Review>) -> Option<Vec<Review>> {
    if *last == polled {
        return None;
    }
    *last = polled;
    Some(last.clone())
}

/// A subscription that aborts the polling task when it ends.
fn abort_on_drop<T>(receiver: mpsc::UnboundedReceiver<T>, task: JoinHandle<()>) -> Subscription<T> {
    Subscription::new(receiver, move || task.abort())
}

/// Sort newest first; equal timestamps keep backend order.
fn newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn review(id: &str, rating: u8) -> Review {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "vendorId": "v",
            "content": "Tasty",
            "rating": rating,
            "author": "Asha",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_unchanged_poll_pushes_nothing() {
        let mut last = vec![review("a", 4)];
        assert_eq!(changed(&mut last, vec![review("a", 4)]), None);
        assert_eq!(last, vec![review("a", 4)]);
    }

    #[test]
    fn test_changed_poll_pushes_snapshot() {
        let mut last = vec![review("a", 4)];

        let update = changed(&mut last, vec![review("b", 5), review("a", 4)]).unwrap();
        assert_eq!(update.len(), 2);
        assert_eq!(last, update);

        // A deleted review is a change too
        let update = changed(&mut last, vec![review("a", 4)]).unwrap();
        assert_eq!(update, vec![review("a", 4)]);
        assert_eq!(changed(&mut last, Vec::new()), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_dropping_subscription_aborts_polling() {
        let (_tx, rx) = mpsc::unbounded_channel::<Vec<Review>>();
        let (alive, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let _alive = alive;
            std::future::pending::<()>().await;
        });

        let subscription = abort_on_drop(rx, task);
        drop(subscription);

        let result = tokio::time::timeout(Duration::from_secs(5), stopped)
            .await
            .expect("polling task still running");
        assert!(result.is_err());
    }

    #[test]
    fn test_newest_first() {
        let mut reviews: Vec<Review> = serde_json::from_str(
            r#"[
                {"id": "a", "vendorId": "v", "content": "old", "rating": 3, "author": "A", "createdAt": "2024-01-01T00:00:00Z"},
                {"id": "b", "vendorId": "v", "content": "new", "rating": 5, "author": "B", "createdAt": "2024-03-01T00:00:00Z"},
                {"id": "c", "vendorId": "v", "content": "mid", "rating": 4, "name": "C", "createdAt": "2024-02-01T00:00:00Z"}
            ]"#,
        )
        .unwrap();
        newest_first(&mut reviews);
        let ids: Vec<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
