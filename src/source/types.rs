//! Page source types and traits

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A transaction as returned by the wallet service
///
/// Only `txid` is interpreted; every other field is carried through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction id
    pub txid: String,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub fields: JsonObject,
}

impl Transaction {
    /// Create a transaction with no extra fields
    pub fn new(txid: impl Into<String>) -> Self {
        Self {
            txid: txid.into(),
            fields: JsonObject::new(),
        }
    }

    /// Add a field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Get a field by name
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    /// Block time (`time`, unix seconds), if the service reported one
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.get("time")
            .and_then(JsonValue::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Raw offset/limit access to a transaction list
///
/// Implementations return at most `count` records starting at `skip` in the
/// source's own order. Order must be stable within a single call.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch up to `count` transactions starting at offset `skip`
    async fn fetch_page(&self, skip: u64, count: usize) -> Result<Vec<Transaction>>;
}

/// Resolves a wallet name to a working page source
///
/// Access failures (unknown wallet, bad credentials) are returned as-is so
/// callers see the original error kind.
#[async_trait]
pub trait PageSourceProvider: Send + Sync {
    /// Get the page source for a wallet
    async fn source(&self, wallet: &str) -> Result<Arc<dyn PageSource>>;
}
