//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{PlacesApi, ReviewsApi, UsersApi, VendorsApi, WeatherApi};
use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Identifies the client to the backend and to the public geocoder
const CLIENT_USER_AGENT: &str = concat!("thelewale/", env!("CARGO_PKG_VERSION"));

/// Who a request is addressed to; only the backend gets the API key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Audience {
    Backend,
    Public,
}

/// Thelewale API client
///
/// This client wraps `reqwest` and adds:
/// - Retry with exponential backoff when configured
/// - Request correlation IDs for tracing
/// - Typed endpoint groups for vendors, reviews, users, places and weather
#[derive(Clone)]
pub struct ThelewaleClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for ThelewaleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThelewaleClient")
            .field("api_url", &self.config.api_url)
            .field("environment", &self.config.environment)
            .finish_non_exhaustive()
    }
}

impl ThelewaleClient {
    /// Create a new client with default configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access vendor endpoints
    #[must_use]
    pub fn vendors(&self) -> VendorsApi {
        VendorsApi::new(self.clone())
    }

    /// Access review endpoints
    #[must_use]
    pub fn reviews(&self) -> ReviewsApi {
        ReviewsApi::new(self.clone())
    }

    /// Access user profile endpoints
    #[must_use]
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access the geocoder
    #[must_use]
    pub fn places(&self) -> PlacesApi {
        PlacesApi::new(self.clone())
    }

    /// Access the weather API
    #[must_use]
    pub fn weather(&self) -> WeatherApi {
        WeatherApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Absolute URL for a backend path
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Absolute URL under another base, with encoded query parameters
    pub fn external_url(&self, base: &str, path: &str, query: &[(&str, &str)]) -> ApiResult<String> {
        let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
        let mut url = Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{joined}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url.into())
    }

    /// Perform a GET request against the backend
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request_url(Method::GET, &self.api_url(path), Option::<&()>::None, Audience::Backend)
            .await
    }

    /// Perform a GET request to an absolute URL, without backend credentials
    #[instrument(skip(self))]
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.request_url(Method::GET, url, Option::<&()>::None, Audience::Public)
            .await
    }

    /// Perform a POST request against the backend
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request_url(Method::POST, &self.api_url(path), Some(body), Audience::Backend)
            .await
    }

    /// Perform a PATCH request against the backend
    #[instrument(skip(self, body))]
    pub async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request_url(Method::PATCH, &self.api_url(path), Some(body), Audience::Backend)
            .await
    }

    /// Perform a DELETE request against the backend
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self
            .request_url(Method::DELETE, &self.api_url(path), Option::<&()>::None, Audience::Backend)
            .await?;
        Ok(())
    }

    /// Execute request with retry logic
    async fn request_url<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        audience: Audience,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        let retry = &self.config.retry;
        let mut attempt = 0;

        loop {
            let start = Instant::now();
            let result = self
                .execute_single_request(&request_id, method.clone(), url, body, audience)
                .await;
            attempt += 1;

            let error = match result {
                Ok(value) => {
                    debug!(request_id = %request_id, attempt, elapsed_ms = start.elapsed().as_millis(), "Request succeeded");
                    return Ok(value);
                }
                Err(e) => e,
            };

            if !retry.retries() || !should_retry(&method, &error) {
                debug!(request_id = %request_id, attempt, error = %error, "Request failed");
                return Err(error);
            }
            if attempt >= retry.max_attempts {
                return Err(ApiError::RetriesExhausted {
                    attempts: attempt,
                    last_error: error.to_string(),
                });
            }

            let delay = retry.delay_for_attempt(attempt);
            debug!(request_id = %request_id, attempt, delay_ms = delay.as_millis(), error = %error, "Retrying");
            tokio::time::sleep(delay).await;
        }
    }

    /// Execute a single request without retry
    async fn execute_single_request<T: DeserializeOwned, B: Serialize>(
        &self,
        request_id: &str,
        method: Method,
        url: &str,
        body: Option<&B>,
        audience: Audience,
    ) -> ApiResult<T> {
        let mut request = self
            .inner
            .request(method, url)
            .header(X_REQUEST_ID, request_id);

        if let (Audience::Backend, Some(key)) = (audience, &self.config.api_key) {
            request = request.bearer_auth(key);
        }

        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        handle_response(response).await
    }
}

/// Whether a failed call may be sent again.
///
/// Writes go out once: a POST or PATCH that timed out may already have been applied.
fn should_retry(method: &Method, error: &ApiError) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::DELETE) && error.is_retryable()
}

/// Handle HTTP response and deserialize
///
/// An empty success body reads as JSON `null`.
async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if status.is_success() {
        let text = response.text().await?;
        decode_body(&text)
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::api_response(status.as_u16(), message))
    }
}

fn decode_body<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    let text = if text.trim().is_empty() { "null" } else { text };
    Ok(serde_json::from_str(text)?)
}
