//! Inbound search requests and their normalization.
//!
//! Normalization is total: any combination of raw parameters produces a
//! usable [`SearchRequest`]. Stricter checks live in
//! [`SearchRequest::validate_strict`] for callers that want to reject bad input
//! instead of defaulting it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix that turns a query into an exact lookup by info hash.
pub const INFO_HASH_PREFIX: &str = "info_hash:";

/// Sort keys accepted at the boundary. The empty key means relevance order.
pub const SORT_KEYS: [&str; 4] = ["", "date", "size", "files"];

/// Sort direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything other than `"asc"` is descending.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw == "asc" { Self::Asc } else { Self::Desc }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document field a sort clause orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreateDate,
    TotalSize,
    FileCount,
    /// Store relevance score
    Score,
}

impl SortField {
    /// Map a request sort key to a field.
    ///
    /// Returns `None` for the empty key (no explicit sort). Unknown keys fall
    /// back to relevance.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "" => None,
            "date" => Some(Self::CreateDate),
            "size" => Some(Self::TotalSize),
            "files" => Some(Self::FileCount),
            _ => Some(Self::Score),
        }
    }

    /// Name of the field in the store's documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateDate => "create_date",
            Self::TotalSize => "total_size",
            Self::FileCount => "file_count",
            Self::Score => "_score",
        }
    }
}

/// A normalized search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// 1-based page number, never zero
    pub page: u32,
    /// Raw sort key; empty for relevance order
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            sort_by: String::new(),
            sort_order: SortOrder::Desc,
        }
    }
}

impl SearchRequest {
    /// Request for a single torrent by its info hash.
    pub fn by_info_hash(info_hash: &str) -> Self {
        Self {
            query: format!("{}{}", INFO_HASH_PREFIX, info_hash),
            ..Self::default()
        }
    }

    /// Info hash targeted by an exact-lookup query, with the prefix stripped once.
    pub fn info_hash(&self) -> Option<&str> {
        self.query.strip_prefix(INFO_HASH_PREFIX)
    }

    /// Sort field requested, if any.
    pub fn sort_field(&self) -> Option<SortField> {
        SortField::from_key(&self.sort_by)
    }

    /// Reject parameters that `normalize` would otherwise default.
    ///
    /// `normalize` folds bad pages and sort orders into their defaults, so both
    /// are checked against the raw strings. An absent or empty value is fine.
    pub fn validate_strict(
        &self,
        raw_page: Option<&str>,
        raw_sort_order: Option<&str>,
    ) -> Result<()> {
        if let Some(raw) = raw_page.filter(|p| !p.is_empty())
            && parse_page(raw).is_none()
        {
            return Err(Error::invalid_request(format!(
                "invalid page '{}', expected a positive integer",
                raw
            )));
        }

        if !SORT_KEYS.contains(&self.sort_by.as_str()) {
            return Err(Error::invalid_request(format!(
                "unsupported sort key '{}', expected one of: date, size, files",
                self.sort_by
            )));
        }

        match raw_sort_order {
            None | Some("" | "asc" | "desc") => Ok(()),
            Some(other) => Err(Error::invalid_request(format!(
                "unsupported sort order '{}', expected asc or desc",
                other
            ))),
        }
    }
}

/// Positive page number, or `None` for anything else.
///
/// Surrounding whitespace is not trimmed; `" 4 "` is not a page.
fn parse_page(raw: &str) -> Option<u32> {
    raw.parse::<i64>()
        .ok()
        .filter(|p| *p > 0)
        .and_then(|p| u32::try_from(p).ok())
}

/// Build a [`SearchRequest`] from raw, string-typed parameters.
///
/// - page: non-numeric, zero, or negative values become 1
/// - sort_by: passed through unchanged
/// - sort_order: `"asc"` is ascending, everything else (including absent) descending
pub fn normalize(
    raw_query: Option<&str>,
    raw_page: Option<&str>,
    raw_sort_by: Option<&str>,
    raw_sort_order: Option<&str>,
) -> SearchRequest {
    let page = raw_page.and_then(parse_page).unwrap_or(1);

    SearchRequest {
        query: raw_query.unwrap_or_default().to_string(),
        page,
        sort_by: raw_sort_by.unwrap_or_default().to_string(),
        sort_order: raw_sort_order.map_or(SortOrder::Desc, SortOrder::parse_lenient),
    }
}
