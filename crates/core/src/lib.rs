//! Core utilities for Thelewale
//!
//! This crate provides shared functionality used by every other crate in the workspace:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration for search, rewards, badges and location
//! - **Retry policy**: backoff parameters for backend calls
//!
//! # Example
//!
//! ```rust,no_run
//! use thelewale_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("search radius: {} km", config.schema.search.radius_km);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod retry;

pub use error::{Category, Error, ErrorCode, ErrorReport, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::RetryConfig;
}
