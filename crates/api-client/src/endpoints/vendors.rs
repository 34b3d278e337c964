//! Vendor endpoints

use super::segment;
use crate::client::ThelewaleClient;
use crate::error::ApiResult;
use serde::de::IgnoredAny;
use serde::Serialize;
use thelewale_vendors::{ModerationStatus, Vendor, VendorFilter, VendorSubmission};

/// Vendor API interface
#[derive(Clone)]
pub struct VendorsApi {
    client: ThelewaleClient,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: ModerationStatus,
}

impl VendorsApi {
    pub(crate) fn new(client: ThelewaleClient) -> Self {
        Self { client }
    }

    /// GET /vendors
    pub async fn list(&self) -> ApiResult<Vec<Vendor>> {
        self.client.get("vendors").await
    }

    /// GET /vendors?{field}={value}
    pub async fn list_where(&self, filter: &VendorFilter) -> ApiResult<Vec<Vendor>> {
        self.client.get(&filter_path(filter)).await
    }

    /// GET /vendors/{id}, `None` on 404
    pub async fn get(&self, id: &str) -> ApiResult<Option<Vendor>> {
        match self.client.get(&format!("vendors/{}", segment(id))).await {
            Ok(vendor) => Ok(Some(vendor)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST /vendors
    pub async fn create(&self, submission: &VendorSubmission) -> ApiResult<Vendor> {
        self.client.post("vendors", submission).await
    }

    /// PATCH /vendors/{id} with the new status
    pub async fn set_status(&self, id: &str, status: ModerationStatus) -> ApiResult<()> {
        let _: IgnoredAny = self
            .client
            .patch(&format!("vendors/{}", segment(id)), &StatusUpdate { status })
            .await?;
        Ok(())
    }

    /// DELETE /vendors/{id}
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("vendors/{}", segment(id))).await
    }
}

fn filter_path(filter: &VendorFilter) -> String {
    let (field, value) = filter.field_value();
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(field, value)
        .finish();
    format!("vendors?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_path() {
        assert_eq!(
            filter_path(&VendorFilter::Status(ModerationStatus::Pending)),
            "vendors?status=pending"
        );
        assert_eq!(
            filter_path(&VendorFilter::SubmittedBy("user 7".into())),
            "vendors?addedBy=user+7"
        );
    }

    #[test]
    fn test_status_update_body() {
        let body = serde_json::to_string(&StatusUpdate {
            status: ModerationStatus::Approved,
        })
        .unwrap();
        assert_eq!(body, r#"{"status":"approved"}"#);
    }
}
