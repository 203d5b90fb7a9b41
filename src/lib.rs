//! Torrent metadata search: translates normalized search requests into store
//! queries and store responses into paginated results.

pub mod config;
pub mod context;
pub mod error;
pub mod search;
pub mod server;
pub mod store;
pub mod tools;
pub mod tracing;
pub mod types;

pub use config::AppConfig;
pub use context::{SearchContext, SearchSettings};
pub use error::{DecodeError, Error, Result};
pub use search::{SearchRequest, SortField, SortOrder, normalize};
pub use server::TorrentServer;
pub use store::{DocumentStore, ElasticClient};
pub use types::{SearchResponse, TorrentFile, TorrentMetadata, format_size};
