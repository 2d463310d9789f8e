//! Wallet service HTTP client
//!
//! Every call is a JSON `GET` against a path under one wallet's base URL.
//! Each attempt first waits on the rate limiter. Timeouts, connection
//! failures and transient statuses are retried with backoff; a `429` waits
//! for the server's `Retry-After` instead.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::types::BackoffType;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("wallet-history/", env!("CARGO_PKG_VERSION"));

/// Seconds to wait on a `429` that carries no usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Retry budget and backoff curve for one client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub backoff_type: BackoffType,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_type: BackoffType::Exponential,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after the given zero-based attempt
    pub fn delay(&self, attempt: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => self
                .initial_backoff
                .saturating_mul(2u32.saturating_pow(attempt)),
        };

        delay.min(self.max_backoff)
    }
}

/// Settings for a client bound to one wallet service
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Root every request path is resolved against, e.g. `https://bws.example.com/bws/api`
    pub base_url: String,
    /// Per-attempt timeout
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Client-side throttle; `None` disables it
    pub rate_limit: Option<RateLimiterConfig>,
}

impl HttpClientConfig {
    /// Defaults for a service at `base_url`, without a rate limit
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            rate_limit: None,
        }
    }
}

/// What to do after one attempt
enum Attempt {
    Done(Response),
    Retry { error: Error, delay: Duration },
    Fail(Error),
}

/// Authenticated JSON client for one wallet service
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Build a client that signs every request with `auth`
    pub fn with_auth(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            retry: config.retry,
            authenticator: Authenticator::new(auth),
            rate_limiter: config.rate_limit.as_ref().map(RateLimiter::new),
        })
    }

    /// `GET` a path and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_json_with_query(path, &[]).await
    }

    /// `GET` a path with query parameters and decode the JSON body
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        let response = self.send(&url, query).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::decode(format!("Invalid JSON from {url}: {e}")))
    }

    async fn send(&self, url: &str, query: &[(&str, String)]) -> Result<Response> {
        let max_attempts = self.retry.max_retries.saturating_add(1);
        let mut attempt = 0;

        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.wait().await;
            }

            let mut request = self.client.get(url).timeout(self.timeout);
            if !query.is_empty() {
                request = request.query(query);
            }
            request = self.authenticator.apply(request);

            let outcome = match request.send().await {
                Ok(response) => self.check_response(response, attempt).await,
                Err(e) => self.check_transport_error(e, attempt),
            };

            match outcome {
                Attempt::Done(response) => {
                    debug!(url, attempt = attempt + 1, "Wallet service request succeeded");
                    return Ok(response);
                }
                Attempt::Retry { error, delay } => {
                    warn!(
                        url,
                        attempt = attempt + 1,
                        max_attempts,
                        ?delay,
                        error = %error,
                        "Wallet service request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Attempt::Fail(error) => return Err(error),
            }
        }
    }

    async fn check_response(&self, response: Response, attempt: u32) -> Attempt {
        let status = response.status();
        let retries_left = attempt < self.retry.max_retries;

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_seconds = retry_after(&response);
            let error = Error::RateLimited { retry_after_seconds };
            return if retries_left {
                Attempt::Retry {
                    error,
                    delay: Duration::from_secs(retry_after_seconds),
                }
            } else {
                Attempt::Fail(error)
            };
        }

        if !(status.is_client_error() || status.is_server_error()) {
            return Attempt::Done(response);
        }

        if is_retryable_status(status) {
            if retries_left {
                return Attempt::Retry {
                    error: Error::http_status(status.as_u16(), ""),
                    delay: self.retry.delay(attempt),
                };
            }
            if self.retry.max_retries > 0 {
                warn!(status = status.as_u16(), "Wallet service still failing, giving up");
                return Attempt::Fail(Error::MaxRetriesExceeded {
                    max_retries: self.retry.max_retries,
                });
            }
        }

        let body = response.text().await.unwrap_or_default();
        Attempt::Fail(Error::http_status(status.as_u16(), body))
    }

    fn check_transport_error(&self, e: reqwest::Error, attempt: u32) -> Attempt {
        let transient = e.is_timeout() || e.is_connect();
        let error = if e.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(e)
        };

        if transient && attempt < self.retry.max_retries {
            Attempt::Retry {
                error,
                delay: self.retry.delay(attempt),
            }
        } else {
            Attempt::Fail(error)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("auth", &self.authenticator.config().scheme())
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status.as_u16(),
        500 | 502 | 503 | 504 | 520 | 521 | 522 | 523 | 524
    )
}

fn retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
