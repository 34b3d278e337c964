//! Vendor, review and profile records as the backend stores them.

use crate::error::{Result, VendorError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thelewale_geo::{Coordinate, Located};
use thelewale_search::Searchable;

/// Moderation state of a vendor listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    /// Awaiting an admin decision
    #[default]
    Pending,
    /// Publicly visible
    Approved,
    /// Declined by an admin
    Rejected,
}

impl ModerationStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }

    /// Whether an admin may move a vendor from `self` to `to`.
    pub fn can_transition_to(self, to: ModerationStatus) -> bool {
        self == ModerationStatus::Pending && to != ModerationStatus::Pending
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    /// Price in rupees; older listings stored it as text
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
}

impl Dish {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
        }
    }
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Price>::deserialize(deserializer)? {
        Some(Price::Number(n)) => Some(n),
        Some(Price::Text(s)) => s.trim().trim_start_matches('₹').trim().parse().ok(),
        None => None,
    })
}

/// A street-food vendor listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub dishes: Vec<Dish>,
    /// Image URLs; uploads happen elsewhere
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub payment_methods: String,
    #[serde(default)]
    pub working_hours: String,
    #[serde(default)]
    pub location: Option<Coordinate>,
    #[serde(default)]
    pub status: ModerationStatus,
    /// User id of the submitter
    #[serde(default, alias = "addedBy")]
    pub submitted_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vendor {
    /// Whether the listing shows up in public search.
    pub fn is_public(&self) -> bool {
        self.status == ModerationStatus::Approved
    }
}

impl Searchable for Vendor {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(3 + self.dishes.len());
        fields.push(self.name.as_str());
        fields.push(self.description.as_str());
        fields.push(self.cuisine.as_str());
        fields.extend(self.dishes.iter().map(|dish| dish.name.as_str()));
        fields
    }
}

impl Located for Vendor {
    fn coordinate(&self) -> Option<Coordinate> {
        self.location
    }
}

/// Listing data entered by a user, before it has an id or a status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVendor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub payment_methods: String,
    #[serde(default)]
    pub working_hours: String,
    #[serde(default)]
    pub location: Option<Coordinate>,
}

impl NewVendor {
    /// Check the listing before anything is written.
    ///
    /// # Errors
    /// [`VendorError::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(VendorError::InvalidInput("vendor name is required".into()));
        }
        for (index, dish) in self.dishes.iter().enumerate() {
            if dish.name.trim().is_empty() {
                return Err(VendorError::InvalidInput(format!("dish #{} has no name", index + 1)));
            }
            if let Some(price) = dish.price {
                if !(price.is_finite() && price >= 0.0) {
                    return Err(VendorError::InvalidInput(format!(
                        "price of `{}` must be a non-negative amount",
                        dish.name
                    )));
                }
            }
        }
        if let Some(location) = &self.location {
            if !location.is_valid() {
                return Err(VendorError::InvalidInput(format!(
                    "location ({}, {}) is out of range",
                    location.latitude, location.longitude
                )));
            }
        }
        Ok(())
    }

    /// The record to create: pending, stamped with submitter and time.
    pub fn into_submission(self, submitted_by: &str, now: DateTime<Utc>) -> VendorSubmission {
        VendorSubmission {
            vendor: self,
            status: ModerationStatus::Pending,
            submitted_by: submitted_by.to_string(),
            created_at: now,
        }
    }
}

/// What a backend receives when a vendor is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSubmission {
    #[serde(flatten)]
    pub vendor: NewVendor,
    pub status: ModerationStatus,
    #[serde(rename = "addedBy")]
    pub submitted_by: String,
    pub created_at: DateTime<Utc>,
}

impl VendorSubmission {
    /// The stored vendor once the backend assigned `id`.
    pub fn into_vendor(self, id: String) -> Vendor {
        let VendorSubmission {
            vendor,
            status,
            submitted_by,
            created_at,
        } = self;
        Vendor {
            id,
            name: vendor.name,
            description: vendor.description,
            cuisine: vendor.cuisine,
            dishes: vendor.dishes,
            images: vendor.images,
            payment_methods: vendor.payment_methods,
            working_hours: vendor.working_hours,
            location: vendor.location,
            status,
            submitted_by: Some(submitted_by),
            created_at,
        }
    }
}

/// A stored review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub vendor_id: String,
    pub content: String,
    /// Older reviews carry no star rating
    #[serde(default)]
    pub rating: Option<u8>,
    /// Author display name
    #[serde(alias = "name")]
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Review text and stars entered by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub rating: u8,
    pub content: String,
}

impl ReviewDraft {
    pub fn new(rating: u8, content: impl Into<String>) -> Self {
        Self {
            rating,
            content: content.into(),
        }
    }

    /// Check stars and text, returning the trimmed content.
    ///
    /// # Errors
    /// [`VendorError::InvalidRating`] outside 1..=5, [`VendorError::InvalidInput`] for
    /// blank content.
    pub fn validate(&self) -> Result<&str> {
        if !(1..=5).contains(&self.rating) {
            return Err(VendorError::InvalidRating(self.rating));
        }
        let content = self.content.trim();
        if content.is_empty() {
            return Err(VendorError::InvalidInput("review text is required".into()));
        }
        Ok(content)
    }
}

/// What a backend receives when a review is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub vendor_id: String,
    pub content: String,
    pub rating: u8,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl NewReview {
    /// The stored review once the backend assigned `id`.
    pub fn into_review(self, id: String) -> Review {
        Review {
            id,
            vendor_id: self.vendor_id,
            content: self.content,
            rating: Some(self.rating),
            author: self.author,
            created_at: self.created_at,
        }
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Per-user contribution record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub vendors_added: u32,
    #[serde(default)]
    pub reviews_given: u32,
    #[serde(default)]
    pub role: Role,
}

impl UserProfile {
    /// A fresh account with no contributions.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            points: 0,
            vendors_added: 0,
            reviews_given: 0,
            role: Role::User,
        }
    }

    #[must_use]
    pub fn admin(mut self) -> Self {
        self.role = Role::Admin;
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Apply an increment in place.
    pub fn apply(&mut self, delta: &ProfileDelta) {
        self.points += delta.points;
        self.vendors_added += delta.vendors_added;
        self.reviews_given += delta.reviews_given;
    }
}

/// Atomic increments applied to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDelta {
    pub points: i64,
    pub vendors_added: u32,
    pub reviews_given: u32,
}

impl ProfileDelta {
    /// Reward for one vendor submission.
    pub fn vendor_added(points: i64) -> Self {
        Self {
            points,
            vendors_added: 1,
            reviews_given: 0,
        }
    }

    /// Reward for one review.
    pub fn review_given(points: i64) -> Self {
        Self {
            points,
            vendors_added: 0,
            reviews_given: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_wire_format() {
        let json = r#"{
            "id": "v1",
            "name": "Sharma Chaat Bhandar",
            "description": "Tangy chaat",
            "cuisine": "Chaat",
            "dishes": [{"name": "Pani Puri", "price": "30"}, {"name": "Aloo Tikki", "price": 50}],
            "paymentMethods": "Cash, UPI",
            "workingHours": "5pm - 11pm",
            "location": {"lat": 28.7041, "lng": 77.1025},
            "status": "approved",
            "addedBy": "u1",
            "createdAt": "2024-11-02T10:00:00Z"
        }"#;

        let vendor: Vendor = serde_json::from_str(json).unwrap();
        assert_eq!(vendor.status, ModerationStatus::Approved);
        assert_eq!(vendor.dishes[0].price, Some(30.0));
        assert_eq!(vendor.dishes[1].price, Some(50.0));
        assert_eq!(vendor.submitted_by.as_deref(), Some("u1"));
        assert!(vendor.images.is_empty());
        assert!(vendor.is_public());
    }

    #[test]
    fn test_unparseable_price_is_unknown() {
        let dish: Dish = serde_json::from_str(r#"{"name": "Chai", "price": "ask"}"#).unwrap();
        assert_eq!(dish.price, None);
        let dish: Dish = serde_json::from_str(r#"{"name": "Chai"}"#).unwrap();
        assert_eq!(dish.price, None);
    }

    #[test]
    fn test_search_fields_cover_dishes() {
        let vendor: Vendor = serde_json::from_str(
            r#"{"id": "v", "name": "Momo Point", "cuisine": "Tibetan",
                "dishes": [{"name": "Thukpa", "price": 90}], "createdAt": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(vendor.search_fields(), vec!["Momo Point", "", "Tibetan", "Thukpa"]);
        assert_eq!(vendor.status, ModerationStatus::Pending);
    }

    #[test]
    fn test_new_vendor_validation() {
        let mut vendor = NewVendor {
            name: "Kake Di Hatti".into(),
            dishes: vec![Dish::new("Kulcha", 60.0)],
            ..NewVendor::default()
        };
        assert!(vendor.validate().is_ok());

        vendor.dishes.push(Dish::new("  ", 10.0));
        assert!(matches!(vendor.validate(), Err(VendorError::InvalidInput(_))));

        vendor.dishes.pop();
        vendor.dishes.push(Dish::new("Lassi", -5.0));
        assert!(vendor.validate().is_err());

        vendor.dishes.pop();
        vendor.location = Some(Coordinate::new(95.0, 77.0));
        assert!(vendor.validate().is_err());

        vendor.location = None;
        vendor.name = " ".into();
        assert!(vendor.validate().is_err());
    }

    #[test]
    fn test_submission_is_pending() {
        let now = Utc::now();
        let submission = NewVendor {
            name: "Momo Point".into(),
            ..NewVendor::default()
        }
        .into_submission("u1", now);

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["addedBy"], "u1");
        assert_eq!(json["name"], "Momo Point");

        let vendor = submission.into_vendor("v9".into());
        assert_eq!(vendor.status, ModerationStatus::Pending);
        assert!(!vendor.is_public());
    }

    #[test]
    fn test_review_draft_validation() {
        assert_eq!(ReviewDraft::new(4, "  Crispy puris ").validate().unwrap(), "Crispy puris");
        assert!(matches!(ReviewDraft::new(0, "ok").validate(), Err(VendorError::InvalidRating(0))));
        assert!(matches!(ReviewDraft::new(6, "ok").validate(), Err(VendorError::InvalidRating(6))));
        assert!(matches!(ReviewDraft::new(3, "   ").validate(), Err(VendorError::InvalidInput(_))));
    }

    #[test]
    fn test_legacy_review_without_rating() {
        let review: Review = serde_json::from_str(
            r#"{"id": "r1", "vendorId": "v1", "content": "Great", "name": "Asha",
                "createdAt": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(review.rating, None);
        assert_eq!(review.author, "Asha");
    }

    #[test]
    fn test_transitions_only_from_pending() {
        use ModerationStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
    }

    #[test]
    fn test_profile_apply_delta() {
        let mut profile = UserProfile::new("u1", "Asha");
        profile.apply(&ProfileDelta::vendor_added(75));
        profile.apply(&ProfileDelta::review_given(10));
        assert_eq!(profile.points, 85);
        assert_eq!(profile.vendors_added, 1);
        assert_eq!(profile.reviews_given, 1);
        assert!(!profile.is_admin());
        assert!(UserProfile::new("a", "Admin").admin().is_admin());
    }
}
