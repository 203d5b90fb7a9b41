//! Single torrent lookup by info hash.

use crate::context::SearchContext;
use rmcp::schemars;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetTorrentRequest {
    /// Info hash of the torrent
    pub info_hash: String,
}

/// Fetch one torrent's metadata as JSON.
pub async fn handle_get_torrent(
    context: &SearchContext,
    request: GetTorrentRequest,
    cancel: &CancellationToken,
) -> Result<String, String> {
    let info_hash = request.info_hash.trim();
    if info_hash.is_empty() {
        return Err("Invalid info_hash: must not be empty".to_string());
    }

    let torrent = context
        .get_torrent(info_hash, cancel)
        .await
        .map_err(|e| format!("Failed to fetch torrent: {}", e))?;

    match torrent {
        Some(torrent) => {
            tracing::info!(info_hash, name = %torrent.name, "Fetched torrent");
            serde_json::to_string(&torrent)
                .map_err(|e| format!("Failed to serialize torrent: {}", e))
        }
        None => {
            tracing::info!(info_hash, "Torrent not found");
            Err(format!("Torrent not found: {}", info_hash))
        }
    }
}
