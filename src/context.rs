//! Search context: the injected store handle plus the settings a search needs.

use crate::error::{Error, Result};
use crate::search::{SearchRequest, TotalRelation, build, decode_envelope, map_results};
use crate::store::DocumentStore;
use crate::types::{SearchResponse, TorrentMetadata};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Values the translator reads from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Index (collection) searched on the store
    pub index: String,
    /// Fixed number of results per page, at least 1
    pub page_size: u32,
    /// Deadline for a single store round trip
    pub timeout: Duration,
}

/// Entry point for translate-and-dispatch searches.
///
/// Holds no per-search state; one context is shared by all concurrent callers.
#[derive(Clone)]
pub struct SearchContext {
    store: Arc<dyn DocumentStore>,
    settings: SearchSettings,
}

impl std::fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SearchContext {
    pub fn new(store: Arc<dyn DocumentStore>, settings: SearchSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Run one search: build the query, dispatch it, and map the hits.
    ///
    /// Fails only when the query cannot be encoded or the store round trip
    /// fails, times out, or is cancelled. Undecodable hits are dropped from the
    /// page.
    pub async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchResponse> {
        let start = Instant::now();
        let query = build(request, self.settings.page_size, &self.settings.index);
        let body = query.encode()?;

        debug!(
            index = %query.index,
            kind = query.body.query.kind(),
            from = query.body.from,
            size = query.body.size,
            "Built search query"
        );

        let raw = self.dispatch(&query.index, body, cancel).await?;
        let envelope = decode_envelope(&raw)?;

        let total = envelope.hits.total;
        if total.relation() == TotalRelation::Gte {
            debug!(total = total.value(), "Store reported a lower bound for total hits");
        }

        let response = map_results(
            total.value(),
            envelope.hits.hits,
            request,
            self.settings.page_size,
        );

        info!(
            query = %request.query,
            page = request.page,
            total = response.total,
            returned = response.results.len(),
            duration_ms = start.elapsed().as_millis(),
            "Search complete"
        );

        Ok(response)
    }

    /// Look up a single torrent by info hash. `Ok(None)` means not found.
    pub async fn get_torrent(
        &self,
        info_hash: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<TorrentMetadata>> {
        let request = SearchRequest::by_info_hash(info_hash);
        let response = self.search(&request, cancel).await?;
        Ok(response.results.into_iter().next())
    }

    /// Send the encoded body to the store, bounded by the timeout and `cancel`.
    async fn dispatch(
        &self,
        index: &str,
        body: Vec<u8>,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>> {
        let timeout = self.settings.timeout;

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(index, "Search cancelled before the store answered");
                Err(Error::Cancelled)
            }
            result = tokio::time::timeout(timeout, self.store.search(index, body)) => {
                result.map_err(|_| Error::timeout(timeout))?
            }
        }
    }
}
