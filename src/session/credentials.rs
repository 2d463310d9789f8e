//! Wallet credentials
//!
//! Each wallet is described by a plaintext descriptor (`<wallet>.json`) and a
//! secret (`<wallet>.key`). The descriptor says how the secret is presented
//! to the wallet service.

use crate::auth::{AuthConfig, Location};
use crate::config::validate_base_url;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

// ============================================================================
// Descriptor
// ============================================================================

/// How the wallet secret is sent to the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthScheme {
    /// `Authorization: Bearer <secret>`
    #[default]
    Bearer,

    /// HTTP Basic with the secret as password
    Basic {
        /// Username, usually the copayer id
        username: String,
    },

    /// Secret placed in a named header or query parameter
    ApiKey {
        /// Header or query
        #[serde(default)]
        location: Location,
        /// Header or parameter name
        name: String,
        /// Prefix added before the secret
        #[serde(default)]
        prefix: Option<String>,
    },
}

impl AuthScheme {
    /// Combine the scheme with a secret into a request auth config
    pub fn with_secret(&self, secret: &str) -> AuthConfig {
        match self {
            AuthScheme::Bearer => AuthConfig::Bearer {
                token: secret.to_string(),
            },
            AuthScheme::Basic { username } => AuthConfig::Basic {
                username: username.clone(),
                password: secret.to_string(),
            },
            AuthScheme::ApiKey {
                location,
                name,
                prefix,
            } => AuthConfig::ApiKey {
                location: *location,
                name: name.clone(),
                prefix: prefix.clone(),
                value: secret.to_string(),
            },
        }
    }
}

/// Contents of `<wallet>.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletDescriptor {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Overrides the configured service URL for this wallet
    #[serde(default)]
    pub base_url: Option<String>,

    /// Auth scheme, bearer when absent
    #[serde(default)]
    pub auth: AuthScheme,
}

// ============================================================================
// Credentials
// ============================================================================

/// Everything needed to open a session for one wallet
#[derive(Clone)]
pub struct WalletCredentials {
    wallet: String,
    descriptor: WalletDescriptor,
    secret: String,
}

impl WalletCredentials {
    /// Create credentials from a descriptor and secret
    pub fn new(
        wallet: impl Into<String>,
        descriptor: WalletDescriptor,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            wallet: wallet.into(),
            descriptor,
            secret: secret.into(),
        }
    }

    /// Bearer credentials with no descriptor overrides
    pub fn bearer(wallet: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::new(wallet, WalletDescriptor::default(), secret)
    }

    /// Wallet name the credentials were loaded for
    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    /// Display name, falling back to the wallet name
    pub fn display_name(&self) -> &str {
        self.descriptor.name.as_deref().unwrap_or(&self.wallet)
    }

    /// Per-wallet service URL, if the descriptor sets one
    pub fn base_url(&self) -> Option<&str> {
        self.descriptor.base_url.as_deref()
    }

    /// Descriptor loaded from the wallet's JSON file
    pub fn descriptor(&self) -> &WalletDescriptor {
        &self.descriptor
    }

    /// Request auth built from the descriptor's scheme and the secret
    pub fn auth_config(&self) -> AuthConfig {
        self.descriptor.auth.with_secret(&self.secret)
    }
}

impl std::fmt::Debug for WalletCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletCredentials")
            .field("wallet", &self.wallet)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Stores
// ============================================================================

/// Source of wallet credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the credentials for a wallet
    ///
    /// Unknown wallets return `Error::WalletNotFound`; anything unreadable or
    /// malformed returns `Error::Credential`.
    async fn load(&self, wallet: &str) -> Result<WalletCredentials>;
}

/// Reads credentials from `<dir>/<wallet>.json` and `<dir>/<wallet>.key`
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the store reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self, wallet: &str) -> Result<WalletCredentials> {
        check_wallet_name(wallet)?;

        let descriptor_path = self.dir.join(format!("{wallet}.json"));
        let raw = match tokio::fs::read_to_string(&descriptor_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::wallet_not_found(wallet));
            }
            Err(e) => {
                return Err(Error::credential(
                    wallet,
                    format!("cannot read '{}': {e}", descriptor_path.display()),
                ));
            }
        };

        let descriptor: WalletDescriptor = serde_json::from_str(&raw).map_err(|e| {
            Error::credential(
                wallet,
                format!("invalid descriptor '{}': {e}", descriptor_path.display()),
            )
        })?;

        if let Some(base_url) = &descriptor.base_url {
            validate_base_url("base_url", base_url)
                .map_err(|e| Error::credential(wallet, format!("invalid base_url: {e}")))?;
        }

        let key_path = self.dir.join(format!("{wallet}.key"));
        let secret = tokio::fs::read_to_string(&key_path).await.map_err(|e| {
            Error::credential(
                wallet,
                format!("cannot read '{}': {e}", key_path.display()),
            )
        })?;

        let secret = secret.trim();
        if secret.is_empty() {
            return Err(Error::credential(wallet, "key file is empty"));
        }

        Ok(WalletCredentials::new(wallet, descriptor, secret))
    }
}

/// Credentials held in memory
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    wallets: RwLock<HashMap<String, WalletCredentials>>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add credentials while building the store
    #[must_use]
    pub fn with_wallet(mut self, credentials: WalletCredentials) -> Self {
        self.wallets
            .get_mut()
            .insert(credentials.wallet().to_string(), credentials);
        self
    }

    /// Add or replace credentials
    pub async fn insert(&self, credentials: WalletCredentials) {
        self.wallets
            .write()
            .await
            .insert(credentials.wallet().to_string(), credentials);
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self, wallet: &str) -> Result<WalletCredentials> {
        self.wallets
            .read()
            .await
            .get(wallet)
            .cloned()
            .ok_or_else(|| Error::wallet_not_found(wallet))
    }
}

/// Wallet names map straight onto file names, so anything that could leave
/// the credentials directory is treated as unknown.
fn check_wallet_name(wallet: &str) -> Result<()> {
    let escapes = wallet.is_empty()
        || wallet.starts_with('.')
        || wallet.contains("..")
        || wallet.contains('/')
        || wallet.contains('\\')
        || wallet.contains('\0');

    if escapes {
        return Err(Error::wallet_not_found(wallet));
    }
    Ok(())
}
