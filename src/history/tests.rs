//! Tests for the history service

use super::*;
use crate::error::Error;
use crate::source::{PageSource, Transaction, VecPageSource};
use async_trait::async_trait;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use std::collections::HashMap;

/// Provider over fixed in-memory wallets
struct StaticProvider {
    wallets: HashMap<String, Arc<VecPageSource>>,
}

impl StaticProvider {
    fn with_wallet(wallet: &str, ids: &[&str]) -> Self {
        let mut wallets = HashMap::new();
        wallets.insert(wallet.to_string(), Arc::new(VecPageSource::from_ids(ids)));
        Self { wallets }
    }
}

#[async_trait]
impl PageSourceProvider for StaticProvider {
    async fn source(&self, wallet: &str) -> Result<Arc<dyn PageSource>> {
        let source = self
            .wallets
            .get(wallet)
            .cloned()
            .ok_or_else(|| Error::wallet_not_found(wallet))?;
        Ok(source)
    }
}

/// Provider whose credentials are always rejected
struct RejectingProvider;

#[async_trait]
impl PageSourceProvider for RejectingProvider {
    async fn source(&self, wallet: &str) -> Result<Arc<dyn PageSource>> {
        Err(Error::credential(wallet, "signature mismatch"))
    }
}

fn ids(trxs: &[Transaction]) -> Vec<&str> {
    trxs.iter().map(|t| t.txid.as_str()).collect()
}

fn history() -> TransactionHistory {
    TransactionHistory::new(Arc::new(StaticProvider::with_wallet(
        "savings",
        &["t5", "t4", "t3", "t2", "t1"],
    )))
}

#[tokio::test]
async fn test_list_trxs_chains_cursors() {
    let history = history();

    let first = history
        .list_trxs("savings", &FetchRequest::new().limit(2))
        .await
        .unwrap();
    assert_eq!(ids(&first.trxs), vec!["t5", "t4"]);
    assert_eq!(first.cursor.as_deref(), Some("t4;1"));

    let second = history
        .list_trxs(
            "savings",
            &FetchRequest::new().cursor("t4;1").limit(2),
        )
        .await
        .unwrap();
    assert_eq!(ids(&second.trxs), vec!["t3", "t2"]);
    assert_eq!(second.cursor.as_deref(), Some("t2;3"));

    let third = history
        .list_trxs(
            "savings",
            &FetchRequest::new().cursor("t2;3").limit(2),
        )
        .await
        .unwrap();
    assert_eq!(ids(&third.trxs), vec!["t1"]);
    assert!(third.is_done());
}

#[tokio::test]
async fn test_list_trxs_until() {
    let page = history()
        .list_trxs("savings", &FetchRequest::new().limit(10).until("t3"))
        .await
        .unwrap();

    assert_eq!(ids(&page.trxs), vec!["t5", "t4"]);
    assert!(page.cursor.is_none());
}

#[tokio::test]
async fn test_default_limit_applies() {
    let history = history().with_default_limit(3);
    assert_eq!(history.default_limit(), 3);

    let page = history
        .list_trxs("savings", &FetchRequest::new())
        .await
        .unwrap();
    assert_eq!(ids(&page.trxs), vec!["t5", "t4", "t3"]);
    assert_eq!(page.cursor.as_deref(), Some("t3;2"));

    assert_eq!(history.with_default_limit(0).default_limit(), 1);
}

#[tokio::test]
async fn test_lookup_errors_keep_their_kind() {
    let err = history()
        .list_trxs("checking", &FetchRequest::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::WalletNotFound { ref wallet } if wallet == "checking"));

    let rejecting = TransactionHistory::new(Arc::new(RejectingProvider));
    let err = rejecting
        .list_trxs("savings", &FetchRequest::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Credential { .. }));
}

#[tokio::test]
async fn test_walk_collects_full_history() {
    let history = history();
    let pages: Vec<TrxPage> = history
        .walk("savings", FetchRequest::new().limit(2))
        .await
        .unwrap()
        .map(|page| page.unwrap())
        .collect()
        .await;

    assert_eq!(pages.len(), 3);
    let all: Vec<&str> = pages.iter().flat_map(|p| ids(&p.trxs)).collect();
    assert_eq!(all, vec!["t5", "t4", "t3", "t2", "t1"]);
    assert!(pages.last().unwrap().is_done());
}

#[tokio::test]
async fn test_walk_unknown_wallet_fails_upfront() {
    let result = history().walk("checking", FetchRequest::new()).await;
    assert!(matches!(result, Err(Error::WalletNotFound { .. })));
}
