//! Transaction pager
//!
//! Turns a skip/limit page source into a resumable, forward-only cursor.
//!
//! The source's offsets drift whenever transactions are prepended, so the
//! pager never trusts `skip` alone. Every page after the first re-requests the
//! last consumed transaction (the fencepost) and only emits what comes after
//! it. `skip` advances by `len - 1` so that fencepost is always re-read.

use super::cursor::Cursor;
use super::types::{FetchRequest, TrxPage, DEFAULT_LIMIT};
use crate::error::Result;
use crate::source::{PageSource, Transaction};
use futures::stream::{self, Stream};
use std::sync::Arc;
use tracing::{debug, warn};

/// Cursor-driven pager over a single page source
#[derive(Clone)]
pub struct TransactionPager {
    source: Arc<dyn PageSource>,
    default_limit: usize,
}

impl TransactionPager {
    /// Create a pager over the given source
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self {
            source,
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Set the limit used when a request carries none
    #[must_use]
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit.max(1);
        self
    }

    /// Fetch up to `limit` transactions following the request's cursor.
    ///
    /// Page source failures propagate untouched; nothing is committed before
    /// a failed fetch, so the same request can simply be retried.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<TrxPage> {
        let limit = request.effective_limit(self.default_limit);
        let until = request.until_trx_id.as_deref().filter(|id| !id.is_empty());
        let Cursor {
            mut next_trx_id,
            mut skip,
        } = Cursor::decode(request.cursor.as_deref());

        let mut page_limit = limit;
        let mut collected: Vec<Transaction> = Vec::new();

        loop {
            let count = page_limit.saturating_add(usize::from(next_trx_id.is_some()));
            debug!(skip, count, anchor = ?next_trx_id, "Fetching transaction page");

            let mut page = self.source.fetch_page(skip, count).await?;
            if page.len() > count {
                warn!(
                    requested = count,
                    returned = page.len(),
                    "Page source returned more records than requested, truncating"
                );
                page.truncate(count);
            }
            debug!(len = page.len(), "Fetched transaction page");

            let only_fencepost =
                page.len() == 1 && next_trx_id.as_deref() == Some(page[0].txid.as_str());
            if page.is_empty() || only_fencepost {
                return Ok(TrxPage::done(collected));
            }

            skip += (page.len() - 1) as u64;

            if let Some(anchor) = next_trx_id.as_deref() {
                match find_trx(&page, anchor) {
                    Some(pos) => {
                        page.drain(..=pos);
                        if !page.is_empty() {
                            next_trx_id = None;
                        }
                    }
                    None if page.len() == 1 => {
                        // skip did not move; another round would fetch the same page
                        warn!(anchor, skip, "Anchor transaction lost at end of history");
                        let cursor = Cursor {
                            next_trx_id,
                            skip,
                        };
                        return Ok(TrxPage::more(collected, cursor.encode()));
                    }
                    None => {
                        warn!(anchor, skip, "Anchor transaction not in page, discarding page");
                        page.clear();
                    }
                }
            }

            if let Some(until) = until {
                if let Some(pos) = find_trx(&page, until) {
                    page.truncate(pos);
                    collected.append(&mut page);
                    return Ok(TrxPage::done(collected));
                }
            }

            collected.append(&mut page);

            let left_to_fetch = limit.saturating_sub(collected.len());
            if next_trx_id.is_none() {
                next_trx_id = collected.last().map(|t| t.txid.clone());
            }

            if left_to_fetch == 0 {
                let cursor = Cursor {
                    next_trx_id,
                    skip,
                };
                return Ok(TrxPage::more(collected, cursor.encode()));
            }

            page_limit = page_limit.min(left_to_fetch);
        }
    }

    /// Walk history page by page, chaining each returned cursor into the next
    /// request. The stream ends after the first page without a cursor or the
    /// first error.
    pub fn walk(&self, request: FetchRequest) -> impl Stream<Item = Result<TrxPage>> + Send {
        let pager = self.clone();
        stream::try_unfold(Some(request), move |next| {
            let pager = pager.clone();
            async move {
                let Some(request) = next else {
                    return Ok(None);
                };
                let page = pager.fetch(&request).await?;
                let following = page.cursor.clone().map(|cursor| FetchRequest {
                    cursor: Some(cursor),
                    ..request
                });
                Ok(Some((page, following)))
            }
        })
    }
}

impl std::fmt::Debug for TransactionPager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionPager")
            .field("default_limit", &self.default_limit)
            .finish_non_exhaustive()
    }
}

fn find_trx(page: &[Transaction], txid: &str) -> Option<usize> {
    page.iter().position(|t| t.txid == txid)
}
