//! Transaction history service
//!
//! The entry point callers use: resolve a wallet to its page source, then run
//! the pager over it.

use crate::config::HistoryConfig;
use crate::error::Result;
use crate::pagination::{FetchRequest, TransactionPager, TrxPage, DEFAULT_LIMIT};
use crate::session::SessionPool;
use crate::source::PageSourceProvider;
use futures::Stream;
use std::sync::Arc;
use tracing::debug;

/// Lists wallet transactions through resumable cursors
#[derive(Clone)]
pub struct TransactionHistory {
    provider: Arc<dyn PageSourceProvider>,
    default_limit: usize,
}

impl TransactionHistory {
    /// Create a service over any page source provider
    pub fn new(provider: Arc<dyn PageSourceProvider>) -> Self {
        Self {
            provider,
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Create a service backed by a file-credential session pool
    pub fn from_config(config: HistoryConfig) -> Self {
        let default_limit = config.default_limit;
        Self::new(Arc::new(SessionPool::from_config(config))).with_default_limit(default_limit)
    }

    /// Set the limit used when a request has none
    #[must_use]
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit.max(1);
        self
    }

    /// Limit used when a request has none
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Return the next window of transactions for a wallet
    ///
    /// Wallet lookup failures are returned with their original kind and no
    /// page is fetched.
    pub async fn list_trxs(&self, wallet: &str, request: &FetchRequest) -> Result<TrxPage> {
        debug!(
            wallet,
            cursor = request.cursor.as_deref(),
            limit = request.limit,
            until = request.until_trx_id.as_deref(),
            "Listing transactions"
        );

        let pager = self.pager(wallet).await?;
        pager.fetch(request).await
    }

    /// Stream every page from `request` onward
    ///
    /// The stream ends after the page that closes the cursor or after the
    /// first error.
    pub async fn walk(
        &self,
        wallet: &str,
        request: FetchRequest,
    ) -> Result<impl Stream<Item = Result<TrxPage>> + Send> {
        let pager = self.pager(wallet).await?;
        Ok(pager.walk(request))
    }

    async fn pager(&self, wallet: &str) -> Result<TransactionPager> {
        let source = self.provider.source(wallet).await?;
        Ok(TransactionPager::new(source).with_default_limit(self.default_limit))
    }
}

impl std::fmt::Debug for TransactionHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionHistory")
            .field("default_limit", &self.default_limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
