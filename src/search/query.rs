//! Query construction for the document store.
//!
//! A [`SearchRequest`] maps to exactly one of three query shapes:
//!
//! 1. empty text: [`Query::MatchAll`]
//! 2. `info_hash:<hash>`: [`Query::Term`] on the document key
//! 3. anything else: [`Query::MultiMatch`] over the name (boost 3) and file paths
//!
//! Every shape is paginated with `from`/`size`. A sort clause is attached only
//! when the request names a sort key. Without one, match-all results come back
//! in the store's native order, which is not guaranteed to be stable between
//! pages; text search results come back in relevance order.

use super::request::{INFO_HASH_PREFIX, SearchRequest, SortField, SortOrder};
use crate::error::{Error, Result};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// Document key field used for exact lookups.
pub const INFO_HASH_FIELD: &str = "info_hash";
/// Torrent name field.
pub const NAME_FIELD: &str = "name";
/// Nested file path field.
pub const FILE_PATH_FIELD: &str = "files.path";

/// Relevance weight of the name field relative to file paths.
pub const NAME_BOOST: u32 = 3;

/// A field with a relevance weight, rendered as `field^boost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBoost {
    pub field: &'static str,
    pub boost: u32,
}

impl FieldBoost {
    pub const fn new(field: &'static str, boost: u32) -> Self {
        Self { field, boost }
    }
}

impl fmt::Display for FieldBoost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.boost == 1 {
            f.write_str(self.field)
        } else {
            write!(f, "{}^{}", self.field, self.boost)
        }
    }
}

impl Serialize for FieldBoost {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The closed set of query shapes the translator emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Every document.
    MatchAll,
    /// Exact, non-analyzed equality on a single field.
    Term { field: &'static str, value: String },
    /// Analyzed text matched against several weighted fields.
    MultiMatch {
        text: String,
        fields: Vec<FieldBoost>,
    },
}

impl Query {
    /// Weighted search over torrent names and file paths.
    pub fn text(text: impl Into<String>) -> Self {
        Self::MultiMatch {
            text: text.into(),
            fields: vec![
                FieldBoost::new(NAME_FIELD, NAME_BOOST),
                FieldBoost::new(FILE_PATH_FIELD, 1),
            ],
        }
    }

    /// Exact lookup by document key.
    pub fn info_hash(value: impl Into<String>) -> Self {
        Self::Term {
            field: INFO_HASH_FIELD,
            value: value.into(),
        }
    }

    /// Short name for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MatchAll => "match_all",
            Self::Term { .. } => "term",
            Self::MultiMatch { .. } => "multi_match",
        }
    }
}

/// `{}`
struct EmptyObject;

impl Serialize for EmptyObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_map(Some(0))?.end()
    }
}

/// `{ "<field>": <value> }`
struct FieldValue<'a, T>(&'a str, &'a T);

impl<T: Serialize> Serialize for FieldValue<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

#[derive(Serialize)]
struct MultiMatchBody<'a> {
    query: &'a str,
    fields: &'a [FieldBoost],
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::MatchAll => map.serialize_entry("match_all", &EmptyObject)?,
            Self::Term { field, value } => {
                map.serialize_entry("term", &FieldValue(field, value))?;
            }
            Self::MultiMatch { text, fields } => map.serialize_entry(
                "multi_match",
                &MultiMatchBody {
                    query: text,
                    fields,
                },
            )?,
        }
        map.end()
    }
}

/// A single sort criterion, rendered as `{ "<field>": { "order": "<dir>" } }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortClause {
    pub field: SortField,
    pub order: SortOrder,
}

#[derive(Serialize)]
struct OrderSpec {
    order: SortOrder,
}

impl Serialize for SortClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        FieldValue(self.field.as_str(), &OrderSpec { order: self.order }).serialize(serializer)
    }
}

/// Sort criteria, serialized as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort(pub Vec<SortClause>);

impl Serialize for Sort {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for clause in &self.0 {
            seq.serialize_element(clause)?;
        }
        seq.end()
    }
}

/// The request body sent to the store's search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchBody {
    pub query: Query,
    pub from: u64,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

/// A built query bound to the index it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub index: String,
    pub body: SearchBody,
}

impl SearchQuery {
    /// Serialize the body to the store's JSON wire format.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.body).map_err(Error::QueryEncoding)
    }
}

/// Pick the query shape for a request's text.
pub fn select_query(text: &str) -> Query {
    if text.is_empty() {
        Query::MatchAll
    } else if let Some(info_hash) = text.strip_prefix(INFO_HASH_PREFIX) {
        Query::info_hash(info_hash)
    } else {
        Query::text(text)
    }
}

/// Build the store query for one page of a search.
pub fn build(request: &SearchRequest, page_size: u32, index: &str) -> SearchQuery {
    let from = u64::from(request.page.saturating_sub(1)) * u64::from(page_size);

    let sort = request.sort_field().map(|field| {
        Sort(vec![SortClause {
            field,
            order: request.sort_order,
        }])
    });

    SearchQuery {
        index: index.to_string(),
        body: SearchBody {
            query: select_query(&request.query),
            from,
            size: page_size,
            sort,
        },
    }
}
