//! Pagination module
//!
//! Cursor-based paging over sources that only offer `skip`/`limit`.
//!
//! # Overview
//!
//! Offsets into a live wallet history shift whenever new transactions land at
//! the head of the list. The pager anchors every call on the last transaction
//! it handed out (the fencepost) and re-reads it on the next call, so callers
//! chaining cursors never see a duplicate and, on a static list, never miss a
//! record.
//!
//! - `Cursor` - encode/decode of the `"<txid>;<skip>"` token
//! - `TransactionPager` - the fetch loop
//! - `FetchRequest` / `TrxPage` - call parameters and result

mod cursor;
mod pager;
mod types;

pub use cursor::{Cursor, CURSOR_DELIMITER};
pub use pager::TransactionPager;
pub use types::{FetchRequest, TrxPage, DEFAULT_LIMIT};
