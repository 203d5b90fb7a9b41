//! Search request translation: normalization, query construction, and result mapping.

pub mod query;
pub mod request;
pub mod results;

pub use query::{Query, SearchBody, SearchQuery, build};
pub use request::{SearchRequest, SortField, SortOrder, normalize};
pub use results::{SearchEnvelope, TotalHits, TotalRelation, decode_envelope, map_results};
