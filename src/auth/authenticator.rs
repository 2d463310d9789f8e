//! Authenticator implementation
//!
//! Applies static credentials to outgoing requests.

use super::types::{AuthConfig, Location};
use reqwest::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,

            AuthConfig::ApiKey {
                location,
                name,
                prefix,
                value,
            } => {
                let val = format!("{}{}", prefix.as_deref().unwrap_or(""), value);
                match location {
                    Location::Header => req.header(name.as_str(), val),
                    Location::Query => req.query(&[(name.as_str(), val)]),
                }
            }

            AuthConfig::Basic { username, password } => req.basic_auth(username, Some(password)),

            AuthConfig::Bearer { token } => req.bearer_auth(token),
        }
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
