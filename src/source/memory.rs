//! In-memory page source

use super::types::{PageSource, Transaction};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Page source over an in-memory list, newest first
///
/// `prepend` inserts at the head, shifting every existing offset the same way
/// a live wallet does when new transactions arrive.
#[derive(Debug, Default)]
pub struct VecPageSource {
    trxs: RwLock<Vec<Transaction>>,
    fetches: AtomicUsize,
}

impl VecPageSource {
    /// Create a source over the given transactions
    pub fn new(trxs: Vec<Transaction>) -> Self {
        Self {
            trxs: RwLock::new(trxs),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Create a source from bare transaction ids
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Self {
        Self::new(ids.iter().map(|id| Transaction::new(id.as_ref())).collect())
    }

    /// Insert transactions at the head of the list, keeping their order
    pub async fn prepend(&self, trxs: Vec<Transaction>) {
        let mut list = self.trxs.write().await;
        let older = std::mem::replace(&mut *list, trxs);
        list.extend(older);
    }

    /// Number of transactions held
    pub async fn len(&self) -> usize {
        self.trxs.read().await.len()
    }

    /// Whether the source holds no transactions
    pub async fn is_empty(&self) -> bool {
        self.trxs.read().await.is_empty()
    }

    /// Number of `fetch_page` calls served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PageSource for VecPageSource {
    async fn fetch_page(&self, skip: u64, count: usize) -> Result<Vec<Transaction>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);

        let list = self.trxs.read().await;
        let start = usize::try_from(skip).unwrap_or(usize::MAX).min(list.len());
        let end = start.saturating_add(count).min(list.len());
        Ok(list[start..end].to_vec())
    }
}
