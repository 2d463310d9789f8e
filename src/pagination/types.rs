//! Pagination request and result types

use crate::source::Transaction;
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};

/// Number of transactions returned per call when no limit is given
pub const DEFAULT_LIMIT: usize = 100;

/// Parameters for a single paging call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Cursor token returned by the previous call
    #[serde(default)]
    pub cursor: Option<String>,
    /// Maximum number of transactions to return (zero or absent uses the default)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Stop before this transaction and close the cursor
    #[serde(default)]
    pub until_trx_id: Option<String>,
}

impl FetchRequest {
    /// Create a request starting at the beginning of history
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a cursor token
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into().none_if_empty();
        self
    }

    /// Set the maximum number of transactions
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Stop before the given transaction
    #[must_use]
    pub fn until(mut self, trx_id: impl Into<String>) -> Self {
        self.until_trx_id = trx_id.into().none_if_empty();
        self
    }

    /// Effective limit, falling back to `default` for absent or zero limits
    pub fn effective_limit(&self, default: usize) -> usize {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => default.max(1),
        }
    }
}

/// Result of a paging call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrxPage {
    /// New transactions, in source order
    pub trxs: Vec<Transaction>,
    /// Continuation token; absent once history is exhausted or a stop point was hit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl TrxPage {
    /// A final page with no continuation
    pub fn done(trxs: Vec<Transaction>) -> Self {
        Self { trxs, cursor: None }
    }

    /// A page that may be followed by more data
    pub fn more(trxs: Vec<Transaction>, cursor: Option<String>) -> Self {
        Self { trxs, cursor }
    }

    /// Whether the caller has reached the end of the stream
    pub fn is_done(&self) -> bool {
        self.cursor.is_none()
    }

    /// Ids of the returned transactions
    pub fn txids(&self) -> Vec<&str> {
        self.trxs.iter().map(|t| t.txid.as_str()).collect()
    }
}
