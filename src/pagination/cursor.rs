//! Cursor codec
//!
//! A cursor is the only state carried between two paging calls. On the wire it
//! is `"<next_trx_id>;<skip>"`: the id of the last fully-consumed transaction
//! and a hint for the physical offset where it was last seen.

use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};

/// Separator between the anchor id and the skip hint
pub const CURSOR_DELIMITER: char = ';';

/// Decoded pagination state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Anchor transaction; resume strictly after it when present
    pub next_trx_id: Option<String>,
    /// Offset hint into the source's list
    pub skip: u64,
}

impl Cursor {
    /// Create a cursor anchored at a transaction
    pub fn new(next_trx_id: impl Into<String>, skip: u64) -> Self {
        Self {
            next_trx_id: Some(next_trx_id.into()),
            skip,
        }
    }

    /// Decode a cursor token.
    ///
    /// Never fails: an absent or empty token decodes to the start of history,
    /// a token without the delimiter is a bare anchor with skip 0, and a
    /// missing or non-numeric skip decodes to 0. Fields are taken verbatim,
    /// with no whitespace trimming.
    pub fn decode(token: Option<&str>) -> Self {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Self::default();
        };

        // Anything past a second delimiter is ignored
        let mut fields = token.split(CURSOR_DELIMITER);
        let next_trx_id = fields
            .next()
            .and_then(|id| id.to_string().none_if_empty());
        let skip = fields
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        Self { next_trx_id, skip }
    }

    /// Encode the cursor, or `None` if it has no anchor to resume from
    pub fn encode(&self) -> Option<String> {
        self.next_trx_id
            .as_ref()
            .map(|id| format!("{id}{CURSOR_DELIMITER}{}", self.skip))
    }

    /// Whether the cursor carries an anchor transaction
    pub fn has_anchor(&self) -> bool {
        self.next_trx_id.is_some()
    }
}
