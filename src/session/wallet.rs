//! HTTP-backed wallet session

use super::credentials::WalletCredentials;
use crate::config::HistoryConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::source::{PageSource, Transaction};
use crate::types::JsonValue;
use async_trait::async_trait;
use tracing::debug;

/// An authenticated connection to one wallet on the wallet service
#[derive(Debug)]
pub struct WalletSession {
    wallet: String,
    client: HttpClient,
    history_path: String,
    status_path: String,
}

impl WalletSession {
    /// Build a session from loaded credentials
    ///
    /// No request is made here; call [`WalletSession::status`] to verify it.
    pub fn new(credentials: &WalletCredentials, config: &HistoryConfig) -> Result<Self> {
        let base_url = credentials.base_url().unwrap_or(&config.base_url);
        let client =
            HttpClient::with_auth(config.http_client_config(base_url), credentials.auth_config())?;

        Ok(Self {
            wallet: credentials.wallet().to_string(),
            client,
            history_path: config.endpoints.history_path.clone(),
            status_path: config.endpoints.status_path.clone(),
        })
    }

    /// Wallet name this session belongs to
    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    /// Fetch the wallet status document
    pub async fn status(&self) -> Result<JsonValue> {
        self.client
            .get_json(&self.status_path)
            .await
            .map_err(|e| classify_access_error(&self.wallet, e))
    }
}

#[async_trait]
impl PageSource for WalletSession {
    async fn fetch_page(&self, skip: u64, count: usize) -> Result<Vec<Transaction>> {
        debug!(wallet = %self.wallet, skip, count, "Requesting history page");

        let query = [
            ("skip", skip.to_string()),
            ("limit", count.to_string()),
            ("includeExtendedInfo", "0".to_string()),
        ];

        let body: JsonValue = self
            .client
            .get_json_with_query(&self.history_path, &query)
            .await
            .map_err(|e| classify_access_error(&self.wallet, e))?;

        parse_page(body)
    }
}

/// Turn a history response body into transactions
fn parse_page(body: JsonValue) -> Result<Vec<Transaction>> {
    let JsonValue::Array(items) = body else {
        return Err(Error::decode(format!(
            "expected a JSON array of transactions, got {}",
            json_kind(&body)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| Error::decode(format!("invalid transaction at index {index}: {e}")))
        })
        .collect()
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Map auth and lookup failures from the service onto access errors
pub(crate) fn classify_access_error(wallet: &str, err: Error) -> Error {
    match err {
        Error::HttpStatus {
            status: status @ (401 | 403),
            ..
        } => Error::credential(
            wallet,
            format!("wallet service rejected the credentials (HTTP {status})"),
        ),
        Error::HttpStatus { status: 404, .. } => Error::wallet_not_found(wallet),
        other => other,
    }
}

#[cfg(test)]
mod wallet_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_page() {
        let trxs = parse_page(json!([
            {"txid": "t2", "action": "sent"},
            {"txid": "t1", "action": "received"}
        ]))
        .unwrap();

        assert_eq!(trxs.len(), 2);
        assert_eq!(trxs[0].txid, "t2");
        assert_eq!(trxs[1].get("action"), Some(&json!("received")));
    }

    #[test]
    fn test_parse_page_rejects_non_arrays() {
        let err = parse_page(json!({"error": "nope"})).unwrap_err();
        assert!(err.to_string().contains("an object"));

        let err = parse_page(json!([{"txid": "t1"}, {"amount": 3}])).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_classify_access_error() {
        let err = classify_access_error("savings", Error::http_status(401, ""));
        assert!(matches!(err, Error::Credential { ref wallet, .. } if wallet == "savings"));

        let err = classify_access_error("savings", Error::http_status(403, ""));
        assert!(matches!(err, Error::Credential { .. }));

        let err = classify_access_error("savings", Error::http_status(404, ""));
        assert!(matches!(err, Error::WalletNotFound { .. }));

        let err = classify_access_error("savings", Error::http_status(502, "bad gateway"));
        assert!(matches!(err, Error::HttpStatus { status: 502, .. }));
    }
}
