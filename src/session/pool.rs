//! Per-wallet session cache

use super::credentials::{CredentialStore, FileCredentialStore};
use super::wallet::WalletSession;
use crate::config::HistoryConfig;
use crate::error::Result;
use crate::source::{PageSource, PageSourceProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Opens wallet sessions on first use and keeps them for later calls
///
/// A session is only cached after the wallet service has answered a status
/// request for it, so a failed open leaves nothing behind.
pub struct SessionPool {
    config: HistoryConfig,
    store: Arc<dyn CredentialStore>,
    sessions: RwLock<HashMap<String, Arc<WalletSession>>>,
}

impl SessionPool {
    /// Create a pool over a credential store
    pub fn new(config: HistoryConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            config,
            store,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a pool reading credentials from `config.credentials_dir`
    pub fn from_config(config: HistoryConfig) -> Self {
        let store = Arc::new(FileCredentialStore::new(config.credentials_dir.clone()));
        Self::new(config, store)
    }

    /// Config the pool opens sessions with
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Get the session for a wallet, opening it if needed
    pub async fn session(&self, wallet: &str) -> Result<Arc<WalletSession>> {
        if let Some(session) = self.sessions.read().await.get(wallet) {
            return Ok(Arc::clone(session));
        }

        let opened = Arc::new(self.open(wallet).await?);

        // Another task may have opened the same wallet meanwhile; keep the first
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(wallet.to_string())
            .or_insert(opened)
            .clone();
        Ok(session)
    }

    async fn open(&self, wallet: &str) -> Result<WalletSession> {
        debug!(wallet, "Loading wallet credentials");
        let credentials = match self.store.load(wallet).await {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!(wallet, error = %e, "Failed to load wallet credentials");
                return Err(e);
            }
        };

        let session = WalletSession::new(&credentials, &self.config)?;
        let status = match session.status().await {
            Ok(status) => status,
            Err(e) => {
                warn!(wallet, error = %e, "Failed to open wallet");
                return Err(e);
            }
        };

        info!(
            wallet,
            name = credentials.display_name(),
            auth = credentials.auth_config().scheme(),
            status = %status,
            "Opening wallet"
        );
        Ok(session)
    }

    /// Drop a cached session, returning whether one was cached
    pub async fn evict(&self, wallet: &str) -> bool {
        self.sessions.write().await.remove(wallet).is_some()
    }

    /// Number of cached sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no wallet has a cached session yet
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Names of wallets with a cached session, sorted
    pub async fn wallets(&self) -> Vec<String> {
        let mut wallets: Vec<String> = self.sessions.read().await.keys().cloned().collect();
        wallets.sort();
        wallets
    }
}

impl std::fmt::Debug for SessionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionPool")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PageSourceProvider for SessionPool {
    async fn source(&self, wallet: &str) -> Result<Arc<dyn PageSource>> {
        let session: Arc<dyn PageSource> = self.session(wallet).await?;
        Ok(session)
    }
}
