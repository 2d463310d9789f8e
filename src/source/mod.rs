//! Page source module
//!
//! A page source is the only thing the pager needs from the outside world: a
//! raw `skip`/`count` fetch against a wallet's transaction list.
//!
//! # Overview
//!
//! - `Transaction` - opaque transaction record keyed by `txid`
//! - `PageSource` - offset/limit page fetch capability
//! - `PageSourceProvider` - resolves a wallet name to a live page source
//! - `VecPageSource` - in-memory source over a fixed list

mod memory;
mod types;

pub use memory::VecPageSource;
pub use types::{PageSource, PageSourceProvider, Transaction};
