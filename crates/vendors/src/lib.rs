//! Vendor discovery core for Thelewale.
//!
//! This crate provides:
//! - The vendor, review and profile model as the backend stores it
//! - The search pipeline: approved-only filter, fuzzy text match or radius filter
//! - Rating aggregation over a live review feed
//! - Badges and contribution rewards
//! - Backend traits plus an in-memory backend
//! - [`VendorService`], the user-facing operations tying these together
//!
//! # Example
//!
//! ```
//! use thelewale_vendors::{InMemoryBackend, SearchMode, VendorService};
//!
//! # tokio_test::block_on(async {
//! let service = VendorService::new(InMemoryBackend::new());
//! let results = service.search(&SearchMode::Text("momos".into()), None).await.unwrap();
//! assert!(results.is_empty());
//! # });
//! ```

pub mod badge;
mod error;
pub mod identity;
pub mod memory;
pub mod model;
pub mod pipeline;
pub mod rating;
pub mod request;
pub mod rewards;
pub mod service;
pub mod store;
pub mod weather;

pub use badge::{Badge, BadgeTable};
pub use error::{Result, StoreError, StoreResult, VendorError};
pub use identity::Identity;
pub use memory::InMemoryBackend;
pub use model::{
    Dish, ModerationStatus, NewReview, NewVendor, ProfileDelta, Review, ReviewDraft, Role, UserProfile,
    Vendor, VendorSubmission,
};
pub use pipeline::{approved_only, RankedResultList, RankedVendor, SearchMode, SearchPipeline};
pub use rating::{average_rating, RatingSummary, RatingWatch};
pub use request::SearchRequest;
pub use rewards::Rewards;
pub use service::{ProfileView, VendorDetails, VendorService};
pub use store::{
    Backend, Geocoder, PlaceSuggestion, ReviewStore, Subscription, UserStore, VendorFilter, VendorStore,
};
pub use weather::{CurrentWeather, WeatherBanner, WeatherMood, WeatherSource};
