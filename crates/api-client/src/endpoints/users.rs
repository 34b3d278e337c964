//! User profile endpoints

use super::segment;
use crate::client::ThelewaleClient;
use crate::error::ApiResult;
use serde::de::IgnoredAny;
use thelewale_vendors::{ProfileDelta, UserProfile};

/// User API interface
#[derive(Clone)]
pub struct UsersApi {
    client: ThelewaleClient,
}

impl UsersApi {
    pub(crate) fn new(client: ThelewaleClient) -> Self {
        Self { client }
    }

    /// GET /users/{id}, `None` on 404
    pub async fn get(&self, user_id: &str) -> ApiResult<Option<UserProfile>> {
        match self.client.get(&format!("users/{}", segment(user_id))).await {
            Ok(profile) => Ok(Some(profile)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST /users/{id}/increment
    ///
    /// The backend applies every field of the delta atomically and creates the
    /// profile when it does not exist yet.
    pub async fn increment(&self, user_id: &str, delta: &ProfileDelta) -> ApiResult<()> {
        let _: IgnoredAny = self
            .client
            .post(&format!("users/{}/increment", segment(user_id)), delta)
            .await?;
        Ok(())
    }
}
