//! HTTP backend for Thelewale
//!
//! This crate provides the client used by the command-line front end to reach the
//! hosted vendor backend, the public geocoder and the weather API.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load URLs and keys from environment variables
//! - **Retry with exponential backoff**: Opt-in; calls are made once by default
//! - **Request correlation**: Track requests with unique IDs for debugging
//! - **Backend traits**: The client implements every `thelewale-vendors` store trait
//!
//! # Example
//!
//! ```rust,no_run
//! use thelewale_api_client::ThelewaleClient;
//! use thelewale_vendors::{SearchMode, VendorService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ThelewaleClient::new()?;
//!     let service = VendorService::new(client);
//!
//!     let results = service.search(&SearchMode::Text("pani puri".into()), None).await?;
//!     println!("{} vendors found", results.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod backend;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::ThelewaleClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::ThelewaleClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{PlacesApi, ReviewsApi, UsersApi, VendorsApi, WeatherApi};
    pub use crate::error::{ApiError, ApiResult};
}
