//! Configuration for the history service
//!
//! Settings are loaded from YAML or JSON (picked by file extension). Every
//! field except `base_url` has a default, and CLI flags are applied on top
//! of whatever the file provides.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, RetryPolicy};
use crate::pagination::DEFAULT_LIMIT;
use crate::types::{BackoffType, LogLevel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Base URL of the wallet service
    #[serde(default)]
    pub base_url: String,

    /// Directory holding `<wallet>.json` / `<wallet>.key` pairs
    #[serde(default = "default_credentials_dir")]
    pub credentials_dir: PathBuf,

    /// Page size used when a request carries no limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Log level for the binary
    #[serde(default)]
    pub log_level: LogLevel,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Wallet service endpoints
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

fn default_credentials_dir() -> PathBuf {
    PathBuf::from("credentials")
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl HistoryConfig {
    /// Create a config with defaults for everything but the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials_dir: default_credentials_dir(),
            default_limit: default_limit(),
            log_level: LogLevel::default(),
            http: HttpConfig::default(),
            endpoints: EndpointConfig::default(),
        }
    }

    /// Load a config file, choosing the format by extension
    ///
    /// The result is not validated, so callers can apply overrides first.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(Error::invalid_value(
                "config",
                format!(
                    "unsupported config file '{}', expected .yaml, .yml or .json",
                    path.display()
                ),
            )),
        }
    }

    /// Parse a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the config for values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        validate_base_url("base_url", &self.base_url)?;

        if self.default_limit == 0 {
            return Err(Error::invalid_value(
                "default_limit",
                "must be greater than zero",
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be greater than zero",
            ));
        }

        if self.http.retry_backoff.initial_ms > self.http.retry_backoff.max_ms {
            return Err(Error::invalid_value(
                "http.retry_backoff",
                "initial_ms cannot exceed max_ms",
            ));
        }

        if self.endpoints.history_path.is_empty() {
            return Err(Error::invalid_value(
                "endpoints.history_path",
                "cannot be empty",
            ));
        }

        if self.endpoints.status_path.is_empty() {
            return Err(Error::invalid_value(
                "endpoints.status_path",
                "cannot be empty",
            ));
        }

        Ok(())
    }

    /// Build the HTTP client settings for a wallet living at `base_url`
    pub fn http_client_config(&self, base_url: &str) -> HttpClientConfig {
        let backoff = &self.http.retry_backoff;
        HttpClientConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(self.http.timeout_seconds),
            retry: RetryPolicy {
                max_retries: self.http.max_retries,
                backoff_type: backoff.backoff_type,
                initial_backoff: Duration::from_millis(backoff.initial_ms),
                max_backoff: Duration::from_millis(backoff.max_ms),
            },
            rate_limit: self.http.rate_limit.clone(),
        }
    }
}

/// Check that a value is an absolute http(s) URL
pub(crate) fn validate_base_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::invalid_value(
            field,
            format!("unsupported URL scheme '{other}'"),
        )),
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Client-side rate limiting, off when absent
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

// ============================================================================
// Endpoints
// ============================================================================

/// Paths on the wallet service, relative to the wallet's base URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Transaction history listing
    #[serde(default = "default_history_path")]
    pub history_path: String,

    /// Wallet status, used to verify a session when it is opened
    #[serde(default = "default_status_path")]
    pub status_path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            history_path: default_history_path(),
            status_path: default_status_path(),
        }
    }
}

fn default_history_path() -> String {
    "/v1/txhistory/".to_string()
}

fn default_status_path() -> String {
    "/v3/wallets/".to_string()
}
