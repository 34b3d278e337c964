//! Backoff for backend calls
//!
//! Backend calls are made once by default; a failed read or write surfaces to the
//! caller immediately. A deployment that wants transient failures absorbed opts into
//! [`RetryConfig::quick`] or its own values.
//!
//! ```rust
//! use thelewale_core::retry::RetryConfig;
//! use std::time::Duration;
//!
//! let config = RetryConfig::quick();
//! assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
//! assert!(RetryConfig::default().delay_for_attempt(3).is_zero());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::time::Duration;

/// Attempts and delays for one backend call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first (1 disables retry)
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Growth factor between consecutive delays
    pub backoff_multiplier: f64,
    /// Stretch each delay by up to a quarter, at random
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }
}

impl RetryConfig {
    /// Three attempts, 50 ms doubling up to 500 ms
    #[must_use]
    pub fn quick() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(50),
            max_delay: Duration::from_millis(500),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// Whether a failed call is tried again at all
    #[must_use]
    pub fn retries(&self) -> bool {
        self.max_attempts > 1
    }

    /// Wait before attempt number `attempt` (0-based; the first attempt never waits)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 || self.initial_delay.is_zero() {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let grown = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        let capped = grown.min(self.max_delay.as_secs_f64());

        let stretched = if self.jitter {
            capped * (1.0 + 0.25 * unit_random())
        } else {
            capped
        };
        Duration::from_secs_f64(stretched)
    }
}

/// Uniform-ish value in `0.0..1.0` from the std hasher's random keys
#[allow(clippy::cast_precision_loss)]
fn unit_random() -> f64 {
    let bits = RandomState::new().hash_one(0u8);
    (bits % 1024) as f64 / 1024.0
}
