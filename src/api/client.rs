// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Thin adapter over `reqwest` used for every REST call.
//!
//! ```text
//! ApiClient::new(base_url, options)
//!   .with_header("PRIVATE-TOKEN", token)
//!   .endpoint("/groups/42/projects", &[("per_page", "10")])
//!   .get_json::<Vec<T>>(url)
//!        |
//!        +-- transport error --> retry (attempts, delay * multiplier^n)
//!        +-- non-2xx ----------> ApiResponse { body: None }
//!        +-- 2xx, empty body --> ApiResponse { body: None }
//!        +-- 2xx --------------> ApiResponse { body: Some(..) }
//! ```

use bon::Builder;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::error::NetworkError;

/// Global HTTP client - initialized once, reused across all services.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("devex-rs/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Retry schedule for transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    #[builder(default = 3)]
    attempts: u32,
    #[builder(default = Duration::from_secs(1))]
    delay: Duration,
    #[builder(default = 2)]
    multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RetryPolicy {
    /// A policy that tries exactly once.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            attempts: 1,
            delay: Duration::ZERO,
            multiplier: 1,
        }
    }

    /// Returns the total number of attempts (at least one).
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        if self.attempts == 0 { 1 } else { self.attempts }
    }

    /// Delay before the given retry (1-based).
    #[must_use]
    pub fn delay_before(&self, retry: u32) -> Duration {
        let factor = self.multiplier.max(1).saturating_pow(retry.saturating_sub(1));
        self.delay.saturating_mul(factor)
    }
}

/// Per-client options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct ClientOptions {
    #[builder(default = Duration::from_secs(30))]
    timeout: Duration,
    #[builder(default)]
    retry: RetryPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClientOptions {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}

/// Status, headers and optionally decoded body of one response.
#[derive(Debug, Clone)]
pub struct ApiResponse<B> {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<B>,
}

/// One page of a listing call.
pub type PageResponse<T> = ApiResponse<Vec<T>>;

impl<B> ApiResponse<B> {
    /// Creates a response by hand (used by tests and custom fetchers).
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Option<B>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consumes the response and returns the body.
    #[must_use]
    pub fn into_body(self) -> Option<B> {
        self.body
    }
}

/// REST client bound to one API root.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
    options: ClientOptions,
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidUrl`] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str, options: ClientOptions) -> Result<Self, NetworkError> {
        let trimmed = base_url.trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| NetworkError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            client: global_client().clone(),
            base_url: trimmed.to_string(),
            headers: HeaderMap::new(),
            options,
        })
    }

    /// Adds a header sent with every request. The value is marked sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidHeader`] if the name or value is not a valid header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, NetworkError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| NetworkError::InvalidHeader(name.to_string()))?;
        let mut header_value =
            HeaderValue::from_str(value).map_err(|_| NetworkError::InvalidHeader(name.to_string()))?;
        header_value.set_sensitive(true);
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Returns the API root this client was created with.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base_url}{path}?{query}`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidUrl`] if the joined URL does not parse.
    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, NetworkError> {
        let raw = format!("{}{path}", self.base_url);
        let mut url = Url::parse(&raw).map_err(|e| NetworkError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GETs `url` and decodes a successful JSON body into `B`.
    ///
    /// Non-success statuses are returned as responses without a body, not as errors.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] if the server stays unreachable after all retries,
    /// or if a successful body is not valid JSON for `B`.
    pub async fn get_json<B: DeserializeOwned>(&self, url: Url) -> Result<ApiResponse<B>, NetworkError> {
        let (status, headers, bytes) = self.get_with_retry(&url).await?;
        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "non-success response");
            return Ok(ApiResponse::new(status, headers, None));
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiResponse::new(status, headers, None));
        }
        let body = serde_json::from_slice(&bytes).map_err(|e| NetworkError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(ApiResponse::new(status, headers, Some(body)))
    }

    async fn get_with_retry(&self, url: &Url) -> Result<(StatusCode, HeaderMap, Vec<u8>), NetworkError> {
        let retry = self.options.retry;
        let mut attempt = 1;
        loop {
            match self.get_once(url).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempt < retry.attempts() => {
                    let delay = retry.delay_before(attempt);
                    warn!(url = %url, attempt, error = %e, delay = ?delay, "transport error, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once(&self, url: &Url) -> Result<(StatusCode, HeaderMap, Vec<u8>), NetworkError> {
        trace!(url = %url, "GET");
        let response = self
            .client
            .get(url.clone())
            .headers(self.headers.clone())
            .timeout(self.options.timeout)
            .send()
            .await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        Ok((status, headers, bytes.to_vec()))
    }
}
