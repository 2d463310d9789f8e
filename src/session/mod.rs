//! Wallet sessions
//!
//! Turns a wallet name into a live, authenticated page source.
//!
//! # Overview
//!
//! - `CredentialStore` - loads `WalletCredentials` (file-backed or in-memory)
//! - `WalletSession` - HTTP `PageSource` for one wallet
//! - `SessionPool` - opens sessions on first use and caches them

mod credentials;
mod pool;
mod wallet;

pub use credentials::{
    AuthScheme, CredentialStore, FileCredentialStore, MemoryCredentialStore, WalletCredentials,
    WalletDescriptor,
};
pub use pool::SessionPool;
pub use wallet::WalletSession;
