//! Torrent search tool.

use crate::context::SearchContext;
use crate::search::normalize;
use crate::types::format_size;
use rmcp::schemars;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Parameters mirror the HTTP search endpoint: every value arrives as a string.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchTorrentsRequest {
    /// Search text. Empty lists everything; `info_hash:<hash>` looks up one torrent.
    #[serde(default)]
    pub q: Option<String>,
    /// 1-based page number (default: 1)
    #[serde(default)]
    pub page: Option<String>,
    /// Sort key: date, size or files. Omit for relevance order.
    #[serde(default)]
    pub sort: Option<String>,
    /// Sort direction: asc or desc (default: desc)
    #[serde(default)]
    pub order: Option<String>,
    /// Reject bad pages, unknown sort keys and directions instead of falling back to defaults
    #[serde(default)]
    pub strict: bool,
}

/// Run a search and return the response as JSON.
pub async fn handle_search(
    context: &SearchContext,
    request: SearchTorrentsRequest,
    cancel: &CancellationToken,
) -> Result<String, String> {
    let search = normalize(
        request.q.as_deref(),
        request.page.as_deref(),
        request.sort.as_deref(),
        request.order.as_deref(),
    );

    if request.strict {
        search
            .validate_strict(request.page.as_deref(), request.order.as_deref())
            .map_err(|e| e.to_string())?;
    }

    let response = context
        .search(&search, cancel)
        .await
        .map_err(|e| format!("Search failed: {}", e))?;

    tracing::debug!(
        total = response.total,
        page_bytes = %format_size(response.results.iter().map(|t| t.total_size).sum()),
        "Returning search page"
    );

    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize results: {}", e))
}
