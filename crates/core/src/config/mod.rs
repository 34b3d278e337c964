//! Configuration loading and schema definitions
//!
//! Tunable constants for search, rewards, badges and the fallback location.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
