//! CLI utilities for Thelewale
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting for vendors, ratings, badges and distances
//! - Progress spinners for backend round trips
//! - Logging setup

#![warn(missing_docs)]

pub mod logging;
pub mod output;
pub mod progress;
