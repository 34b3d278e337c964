//! User-facing operations over a backend.
//!
//! Each call makes its backend round trips and then runs synchronously over the
//! returned data. Writes that span two records (the entity and the contributor's
//! profile) undo the first write when the second one fails.

use crate::badge::{Badge, BadgeTable};
use crate::error::{Result, StoreResult, VendorError};
use crate::identity::{require, Identity};
use crate::model::{ModerationStatus, NewReview, NewVendor, ProfileDelta, Review, ReviewDraft, UserProfile, Vendor};
use crate::pipeline::{RankedResultList, SearchMode, SearchPipeline};
use crate::rating::{RatingSummary, RatingWatch};
use crate::request::SearchRequest;
use crate::rewards::Rewards;
use crate::store::{Backend, PlaceSuggestion, VendorFilter};
use chrono::Utc;
use serde::Serialize;
use std::future::Future;
use thelewale_core::config::ConfigSchema;
use thelewale_geo::{Coordinate, PlaceQuery};
use tracing::{error, info, instrument, warn};

/// Autocomplete list length for place search.
pub const PLACE_SUGGESTION_LIMIT: usize = 5;

/// A vendor page: listing, reviews newest first, and rating.
#[derive(Debug, Clone, Serialize)]
pub struct VendorDetails {
    pub vendor: Vendor,
    pub reviews: Vec<Review>,
    pub rating: RatingSummary,
}

/// A contributor's profile page.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub profile: UserProfile,
    pub badge: Badge,
    /// Next tier and the points still missing
    pub next_badge: Option<(Badge, i64)>,
    /// Vendors this user submitted, any status
    pub vendors: Vec<Vendor>,
}

/// Vendor discovery, contribution and moderation.
#[derive(Debug, Clone)]
pub struct VendorService<B> {
    backend: B,
    pipeline: SearchPipeline,
    badges: BadgeTable,
    rewards: Rewards,
    default_location: Coordinate,
}

impl<B: Backend> VendorService<B> {
    /// Service with the built-in thresholds.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            pipeline: SearchPipeline::default(),
            badges: BadgeTable::default(),
            rewards: Rewards::default(),
            default_location: Coordinate::new(28.6139, 77.2090),
        }
    }

    /// Service tuned by a loaded configuration.
    ///
    /// # Errors
    /// [`VendorError::Config`] or [`VendorError::Search`] for values the pipeline or
    /// the badge table cannot use.
    pub fn from_config(backend: B, schema: &ConfigSchema) -> Result<Self> {
        let location = &schema.location;
        let default_location = Coordinate::try_new(location.default_latitude, location.default_longitude)
            .map_err(|e| VendorError::Config(e.to_string()))?;
        Ok(Self {
            backend,
            pipeline: SearchPipeline::from_config(&schema.search)?,
            badges: BadgeTable::from_config(&schema.badges)?,
            rewards: Rewards::from(&schema.rewards),
            default_location,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn pipeline(&self) -> &SearchPipeline {
        &self.pipeline
    }

    pub fn badges(&self) -> &BadgeTable {
        &self.badges
    }

    pub fn rewards(&self) -> &Rewards {
        &self.rewards
    }

    /// The user's position, or the configured fallback when it is unknown.
    pub fn resolve_location(&self, located: Option<Coordinate>) -> Coordinate {
        located.filter(Coordinate::is_valid).unwrap_or(self.default_location)
    }

    /// Fetch every vendor and run the pipeline.
    ///
    /// # Errors
    /// Backend failures, an over-long query, or an invalid origin.
    pub async fn search(&self, mode: &SearchMode, user: Option<&Coordinate>) -> Result<RankedResultList> {
        let vendors = self.backend.list_vendors().await?;
        self.pipeline.run(mode, vendors, user)
    }

    /// Run a results-page request, geocoding place names first.
    ///
    /// A place name the geocoder does not know yields an empty list.
    pub async fn search_request(&self, request: &SearchRequest, user: Option<&Coordinate>) -> Result<RankedResultList> {
        let mode = match request {
            SearchRequest::Dish(query) => SearchMode::Text(query.clone()),
            SearchRequest::Browse => SearchMode::Text(String::new()),
            SearchRequest::Place(PlaceQuery::Coordinate(coord)) => SearchMode::Near(*coord),
            SearchRequest::Place(PlaceQuery::Named(name)) => match self.backend.geocode(name).await? {
                Some(coord) => SearchMode::Near(coord),
                None => {
                    info!(place = %name, "place not found by geocoder");
                    return Ok(RankedResultList::empty());
                }
            },
        };
        self.search(&mode, user).await
    }

    /// Autocomplete candidates for the place box.
    pub async fn place_suggestions(&self, query: &str) -> Result<Vec<PlaceSuggestion>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let mut hits = self.backend.suggest(query.trim(), PLACE_SUGGESTION_LIMIT).await?;
        hits.truncate(PLACE_SUGGESTION_LIMIT);
        Ok(hits)
    }

    /// A vendor page.
    ///
    /// Pending and rejected vendors are only shown to their submitter and to admins;
    /// anyone else gets [`VendorError::NotFound`].
    pub async fn vendor_details(&self, vendor_id: &str, viewer: Option<&Identity>) -> Result<VendorDetails> {
        let vendor = self.visible_vendor(vendor_id, viewer).await?;
        let reviews = self.backend.list_reviews(vendor_id).await?;
        let rating = RatingSummary::from_reviews(&reviews);
        Ok(VendorDetails { vendor, reviews, rating })
    }

    async fn visible_vendor(&self, vendor_id: &str, viewer: Option<&Identity>) -> Result<Vendor> {
        let vendor = self
            .backend
            .get_vendor(vendor_id)
            .await?
            .ok_or_else(|| VendorError::not_found("vendor", vendor_id))?;

        if !vendor.is_public() && !self.can_see_unpublished(&vendor, viewer).await? {
            return Err(VendorError::not_found("vendor", vendor_id));
        }
        Ok(vendor)
    }

    async fn can_see_unpublished(&self, vendor: &Vendor, viewer: Option<&Identity>) -> Result<bool> {
        let Some(viewer) = viewer else {
            return Ok(false);
        };
        if vendor.submitted_by.as_deref() == Some(viewer.user_id.as_str()) {
            return Ok(true);
        }
        let profile = self.backend.get_user(&viewer.user_id).await?;
        Ok(profile.is_some_and(|p| p.is_admin()))
    }

    /// Submit a listing for moderation and reward the submitter.
    ///
    /// # Errors
    /// [`VendorError::SignInRequired`] before any write, validation errors, backend
    /// failures, and [`VendorError::RolledBack`] / [`VendorError::CompensationFailed`]
    /// when the reward could not be recorded.
    #[instrument(skip_all, fields(vendor = %vendor.name))]
    pub async fn submit_vendor(&self, identity: Option<&Identity>, vendor: NewVendor) -> Result<Vendor> {
        let identity = require(identity, "add a vendor")?;
        vendor.validate()?;

        let submission = vendor.into_submission(&identity.user_id, Utc::now());
        let created = self.backend.create_vendor(&submission).await?;
        info!(vendor_id = %created.id, user_id = %identity.user_id, "vendor submitted for review");

        self.reward(
            &identity.user_id,
            self.rewards.for_vendor(),
            "award points for the vendor",
            self.backend.delete_vendor(&created.id),
        )
        .await?;

        Ok(created)
    }

    /// Post a review and reward the reviewer.
    ///
    /// # Errors
    /// As for [`submit_vendor`](Self::submit_vendor), plus [`VendorError::NotFound`] for
    /// an unknown vendor or one the reviewer may not see.
    #[instrument(skip_all, fields(vendor_id = %vendor_id, rating = draft.rating))]
    pub async fn submit_review(
        &self,
        identity: Option<&Identity>,
        vendor_id: &str,
        draft: ReviewDraft,
    ) -> Result<Review> {
        let identity = require(identity, "write a review")?;
        let content = draft.validate()?.to_string();

        self.visible_vendor(vendor_id, Some(identity)).await?;

        let review = NewReview {
            vendor_id: vendor_id.to_string(),
            content,
            rating: draft.rating,
            author: identity.author_name().to_string(),
            created_at: Utc::now(),
        };
        let created = self.backend.add_review(&review).await?;
        info!(review_id = %created.id, user_id = %identity.user_id, "review posted");

        self.reward(
            &identity.user_id,
            self.rewards.for_review(),
            "award points for the review",
            self.backend.delete_review(vendor_id, &created.id),
        )
        .await?;

        Ok(created)
    }

    async fn reward<F>(&self, user_id: &str, delta: ProfileDelta, step: &'static str, undo: F) -> Result<()>
    where
        F: Future<Output = StoreResult<()>>,
    {
        let Err(source) = self.backend.increment_user(user_id, &delta).await else {
            return Ok(());
        };

        warn!(user_id, step, error = %source, "reward failed, rolling back");
        match undo.await {
            Ok(()) => Err(VendorError::RolledBack { step, source }),
            Err(rollback) => {
                error!(user_id, step, error = %source, rollback = %rollback, "rollback failed");
                Err(VendorError::CompensationFailed { step, source, rollback })
            }
        }
    }

    async fn require_admin<'a>(&self, identity: Option<&'a Identity>) -> Result<&'a Identity> {
        let identity = require(identity, "moderate vendors")?;
        match self.backend.get_user(&identity.user_id).await? {
            Some(profile) if profile.is_admin() => Ok(identity),
            _ => Err(VendorError::NotAdmin),
        }
    }

    /// Listings awaiting moderation. Admins only.
    pub async fn pending_vendors(&self, identity: Option<&Identity>) -> Result<Vec<Vendor>> {
        self.require_admin(identity).await?;
        Ok(self
            .backend
            .vendors_where(&VendorFilter::Status(ModerationStatus::Pending))
            .await?)
    }

    /// Publish a pending listing. Admins only.
    pub async fn approve(&self, identity: Option<&Identity>, vendor_id: &str) -> Result<Vendor> {
        self.moderate(identity, vendor_id, ModerationStatus::Approved).await
    }

    /// Decline a pending listing. Admins only.
    pub async fn reject(&self, identity: Option<&Identity>, vendor_id: &str) -> Result<Vendor> {
        self.moderate(identity, vendor_id, ModerationStatus::Rejected).await
    }

    async fn moderate(&self, identity: Option<&Identity>, vendor_id: &str, to: ModerationStatus) -> Result<Vendor> {
        let admin = self.require_admin(identity).await?;
        let mut vendor = self
            .backend
            .get_vendor(vendor_id)
            .await?
            .ok_or_else(|| VendorError::not_found("vendor", vendor_id))?;

        if !vendor.status.can_transition_to(to) {
            return Err(VendorError::InvalidTransition { from: vendor.status, to });
        }

        self.backend.set_status(vendor_id, to).await?;
        info!(vendor_id, status = %to, admin = %admin.user_id, "vendor moderated");
        vendor.status = to;
        Ok(vendor)
    }

    /// The signed-in user's profile, badge and submissions.
    ///
    /// A user without a stored profile yet is shown with zero points.
    pub async fn profile(&self, identity: Option<&Identity>) -> Result<ProfileView> {
        let identity = require(identity, "view your profile")?;
        let profile = self
            .backend
            .get_user(&identity.user_id)
            .await?
            .unwrap_or_else(|| UserProfile::new(&identity.user_id, identity.author_name()));
        let vendors = self
            .backend
            .vendors_where(&VendorFilter::SubmittedBy(identity.user_id.clone()))
            .await?;

        let points = Some(profile.points);
        let badge = self.badges.badge_for(points).clone();
        let next_badge = self
            .badges
            .next_badge(points)
            .map(|next| (next.badge.clone(), next.points_needed));

        Ok(ProfileView {
            profile,
            badge,
            next_badge,
            vendors,
        })
    }

    /// Live rating of a vendor, recomputed on every review change.
    pub async fn watch_ratings(&self, vendor_id: &str) -> Result<RatingWatch> {
        let feed = self.backend.subscribe_reviews(vendor_id).await?;
        info!(vendor_id, "watching reviews");
        Ok(RatingWatch::new(feed))
    }
}
