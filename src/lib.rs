// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # wallet-history
//!
//! Resumable, duplicate-free cursor paging over wallet services that only
//! expose `skip`/`limit` transaction history.
//!
//! ## Features
//!
//! - **Fencepost cursors**: every call re-reads the last transaction it
//!   returned, so new transactions arriving at the head of the list never
//!   cause duplicates across chained calls
//! - **Early stop**: `until_trx_id` ends a walk at a known transaction
//! - **Wallet sessions**: per-wallet credentials, opened once and cached
//! - **Robust HTTP**: retries with backoff, rate limiting, pluggable auth
//! - **CLI and HTTP server**: `wallet-history list` and `wallet-history serve`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wallet_history::{FetchRequest, HistoryConfig, TransactionHistory};
//!
//! #[tokio::main]
//! async fn main() -> wallet_history::Result<()> {
//!     let config = HistoryConfig::from_file("history.yaml")?;
//!     config.validate()?;
//!     let history = TransactionHistory::from_config(config);
//!
//!     let mut request = FetchRequest::new().limit(50);
//!     loop {
//!         let page = history.list_trxs("savings", &request).await?;
//!         for trx in &page.trxs {
//!             println!("{}", trx.txid);
//!         }
//!         match page.cursor {
//!             Some(cursor) => request = request.cursor(cursor),
//!             None => break,
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  TransactionHistory::list_trxs(wallet, FetchRequest)     │
//! └──────────────┬───────────────────────────┬───────────────┘
//!                │                           │
//!   ┌────────────┴───────────┐   ┌───────────┴────────────┐
//!   │  PageSourceProvider    │   │  TransactionPager      │
//!   │  SessionPool           │   │  Cursor "<txid>;<skip>"│
//!   │  CredentialStore       │   │  fencepost dedup       │
//!   └────────────┬───────────┘   └───────────┬────────────┘
//!                │                           │
//!   ┌────────────┴───────────────────────────┴────────────┐
//!   │  PageSource::fetch_page(skip, count)                │
//!   │  WalletSession (HTTP)  │  VecPageSource (memory)    │
//!   └─────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Cursor codec and transaction pager
pub mod pagination;

/// Page source trait and in-memory source
pub mod source;

/// Wallet credentials and session pool
pub mod session;

/// Transaction history service
pub mod history;

/// Service configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::HistoryConfig;
pub use history::TransactionHistory;
pub use pagination::{Cursor, FetchRequest, TransactionPager, TrxPage};
pub use session::SessionPool;
pub use source::{PageSource, PageSourceProvider, Transaction, VecPageSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
