//! Document store access.
//!
//! The translator only needs one operation from the store: run a search body
//! against an index and hand back the raw response bytes. Anything that can do
//! that (the Elasticsearch client, or an in-memory fake in tests) implements
//! [`DocumentStore`].

pub mod elastic;

pub use elastic::ElasticClient;

use crate::error::Result;
use futures::future::BoxFuture;

/// A search backend reachable through a query/response protocol.
///
/// Implementations must be safe to share across concurrent searches; connection
/// pooling and any retry policy belong to the implementation.
pub trait DocumentStore: Send + Sync {
    /// Run an encoded search body against `index` and return the raw response body.
    fn search<'a>(&'a self, index: &'a str, body: Vec<u8>) -> BoxFuture<'a, Result<Vec<u8>>>;
}
