//! Typed decoding of store responses into paginated search results.
//!
//! The envelope (`hits.total`, `hits.hits`) must decode or the whole call
//! fails. Individual hits are decoded one at a time; a hit that does not
//! produce valid [`TorrentMetadata`] is logged and skipped.

use super::request::SearchRequest;
use crate::error::{DecodeError, Error, Result};
use crate::types::{SearchResponse, TorrentMetadata};
use serde::Deserialize;
use serde_json::Value;

/// Top-level search response from the store.
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    pub hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct HitsEnvelope {
    pub total: TotalHits,
    /// Left undecoded so one bad hit cannot fail the envelope
    #[serde(default)]
    pub hits: Vec<Value>,
}

/// Whether a reported total is exact or a lower bound.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalRelation {
    #[default]
    Eq,
    Gte,
}

/// `hits.total`, either `{ "value": n, "relation": "eq" }` or a bare count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Detailed {
        value: u64,
        #[serde(default)]
        relation: TotalRelation,
    },
    Count(u64),
}

impl TotalHits {
    pub const fn value(self) -> u64 {
        match self {
            Self::Detailed { value, .. } | Self::Count(value) => value,
        }
    }

    pub const fn relation(self) -> TotalRelation {
        match self {
            Self::Detailed { relation, .. } => relation,
            Self::Count(_) => TotalRelation::Eq,
        }
    }
}

/// One hit as returned by the store.
#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(rename = "_source", default)]
    source: Option<Value>,
}

/// Decode the store's response body.
pub fn decode_envelope(body: &[u8]) -> Result<SearchEnvelope> {
    serde_json::from_slice(body).map_err(|e| Error::invalid_response(e.to_string()))
}

/// Decode a single hit into torrent metadata.
///
/// `position` identifies the hit in logs when the store did not send an `_id`.
pub fn decode_hit(
    hit: Value,
    position: usize,
) -> std::result::Result<TorrentMetadata, DecodeError> {
    let fallback_id = || format!("#{}", position);

    let raw: RawHit = serde_json::from_value(hit).map_err(|error| DecodeError::Malformed {
        id: fallback_id(),
        error,
    })?;
    let id = raw.id.unwrap_or_else(fallback_id);

    let source = match raw.source {
        Some(Value::Null) | None => return Err(DecodeError::MissingSource { id }),
        Some(source) => source,
    };

    let metadata: TorrentMetadata = match serde_json::from_value(source) {
        Ok(metadata) => metadata,
        Err(error) => return Err(DecodeError::Malformed { id, error }),
    };

    if usize::try_from(metadata.file_count).ok() != Some(metadata.files.len()) {
        return Err(DecodeError::FileCountMismatch {
            id,
            file_count: metadata.file_count,
            files: metadata.files.len(),
        });
    }

    Ok(metadata)
}

/// Assemble a page of results from the store's total and raw hits.
///
/// `total` is passed through, never recomputed from the hits. `page` and
/// `per_page` are echoed from the request. Hit order is preserved; at most
/// `page_size` results are kept.
pub fn map_results(
    raw_total: u64,
    raw_hits: Vec<Value>,
    request: &SearchRequest,
    page_size: u32,
) -> SearchResponse {
    let limit = usize::try_from(page_size).unwrap_or(usize::MAX);
    if raw_hits.len() > limit {
        tracing::debug!(
            hits = raw_hits.len(),
            page_size,
            "Store returned more hits than requested, truncating"
        );
    }

    let mut skipped = 0usize;
    let results: Vec<TorrentMetadata> = raw_hits
        .into_iter()
        .take(limit)
        .enumerate()
        .filter_map(|(position, hit)| match decode_hit(hit, position) {
            Ok(metadata) => Some(metadata),
            Err(error) => {
                skipped += 1;
                tracing::warn!(%error, "Skipping undecodable search hit");
                None
            }
        })
        .collect();

    if skipped > 0 {
        tracing::debug!(skipped, kept = results.len(), "Dropped malformed hits from page");
    }

    SearchResponse {
        total: raw_total,
        page: request.page,
        per_page: page_size,
        results,
    }
}
