//! HTTP access to wallet services
//!
//! - **Retries**: constant, linear or exponential backoff on transient failures
//! - **Rate limiting**: token bucket throttle using governor
//! - **Authentication**: every request is signed through the auth module

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RetryPolicy};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
