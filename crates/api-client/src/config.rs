//! Configuration for the Thelewale API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thelewale_core::retry::RetryConfig;

/// Default production backend URL
const DEFAULT_API_URL: &str = "https://api.thelewale.in/v1";

/// Public Nominatim instance
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Open-Meteo forecast API
const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1";

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development backend
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse from environment variable
    pub fn from_env() -> Self {
        Self::parse(&env::var("THELEWALE_ENV").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the vendor backend
    pub api_url: String,
    /// Base URL of the Nominatim-style geocoder
    pub geocoder_url: String,
    /// Base URL of the weather API
    pub weather_url: String,
    /// Backend API key, sent as a bearer token
    pub api_key: Option<String>,
    /// Request timeout
    #[serde(with = "secs")]
    pub timeout: Duration,
    /// How often a review subscription polls for changes
    #[serde(with = "secs")]
    pub poll_interval: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
}

mod secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(5),
            retry: RetryConfig::default(),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `THELEWALE_ENV`: Environment (development/staging/production)
    /// - `THELEWALE_API_URL`: Vendor backend URL (defaults per environment)
    /// - `THELEWALE_API_KEY`: Backend API key
    /// - `THELEWALE_TIMEOUT_SECS`: Request timeout in seconds
    /// - `THELEWALE_GEOCODER_URL`: Geocoder base URL
    /// - `THELEWALE_WEATHER_URL`: Weather API base URL
    pub fn from_env() -> ApiResult<Self> {
        let base = match Environment::from_env() {
            Environment::Development => Self::development(),
            Environment::Staging => Self::staging(),
            Environment::Production => Self::production(),
        };

        let timeout = match env::var("THELEWALE_TIMEOUT_SECS") {
            Ok(value) => value
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("THELEWALE_TIMEOUT_SECS is not a number: {value}")))?,
            Err(_) => base.timeout,
        };

        let config = Self {
            api_url: env::var("THELEWALE_API_URL").unwrap_or(base.api_url),
            geocoder_url: env::var("THELEWALE_GEOCODER_URL").unwrap_or(base.geocoder_url),
            weather_url: env::var("THELEWALE_WEATHER_URL").unwrap_or(base.weather_url),
            api_key: env::var("THELEWALE_API_KEY").ok().or(base.api_key),
            timeout,
            ..base
        };
        config.validate()?;
        Ok(config)
    }

    /// Create development configuration (local backend)
    #[must_use]
    pub fn development() -> Self {
        Self {
            api_url: "http://localhost:8787/v1".to_string(),
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_secs(2),
            retry: RetryConfig::quick(),
            environment: Environment::Development,
            ..Self::default()
        }
    }

    /// Create staging configuration
    #[must_use]
    pub fn staging() -> Self {
        Self {
            api_url: "https://staging-api.thelewale.in/v1".to_string(),
            environment: Environment::Staging,
            ..Self::default()
        }
    }

    /// Create production configuration
    ///
    /// Calls are made once; failures surface to the caller without retry.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Builder-style method to set the backend URL
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Builder-style method to set the geocoder URL
    #[must_use]
    pub fn with_geocoder_url(mut self, url: impl Into<String>) -> Self {
        self.geocoder_url = url.into();
        self
    }

    /// Builder-style method to set the weather URL
    #[must_use]
    pub fn with_weather_url(mut self, url: impl Into<String>) -> Self {
        self.weather_url = url.into();
        self
    }

    /// Builder-style method to set the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the review polling interval
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        for (name, value) in [
            ("api_url", &self.api_url),
            ("geocoder_url", &self.geocoder_url),
            ("weather_url", &self.weather_url),
        ] {
            if value.is_empty() {
                return Err(ApiError::config(format!("{name} cannot be empty")));
            }
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(ApiError::config(format!("{name} must start with http:// or https://")));
            }
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.poll_interval.is_zero() {
            return Err(ApiError::config("poll_interval cannot be zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(ApiError::config("retry.max_attempts must be at least 1"));
        }

        Ok(())
    }
}
