//! Authentication module
//!
//! Supports: API Key, Basic, Bearer
//!
//! The `Authenticator` applies a wallet's credentials to every request made
//! against the wallet service.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Location};
