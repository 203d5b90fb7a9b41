//! Shared test fixtures for integration tests.
//!
//! [`FakeStore`] stands in for the document store: it answers every search
//! with a canned response (or a canned failure) and records the requests it
//! received so tests can assert on the exact query the translator built.

use futures::FutureExt;
use futures::future::BoxFuture;
use rstest::fixture;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use torrent_search::{DocumentStore, Error, SearchContext, SearchSettings};

pub const INDEX: &str = "bittorrent_metadata";
pub const PAGE_SIZE: u32 = 15;

/// How the fake store answers.
#[allow(dead_code)] // Variants used across different integration test crates
pub enum Reply {
    /// Respond with this JSON body.
    Body(Value),
    /// Respond with raw bytes (for malformed envelopes).
    Raw(Vec<u8>),
    /// Fail as if the store were down.
    Unavailable,
    /// Never answer.
    Hang,
}

/// A request the fake store received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub index: String,
    pub body: Value,
}

pub struct FakeStore {
    reply: Reply,
    requests: Mutex<Vec<Recorded>>,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl FakeStore {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Store that returns the given hits with `total` matches.
    pub fn with_hits(total: u64, hits: Vec<Value>) -> Arc<Self> {
        Self::new(Reply::Body(envelope(total, hits)))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Body of the only request received.
    pub fn single_body(&self) -> Value {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one store request");
        requests[0].body.clone()
    }
}

impl DocumentStore for FakeStore {
    fn search<'a>(
        &'a self,
        index: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, torrent_search::Result<Vec<u8>>> {
        async move {
            let body: Value = serde_json::from_slice(&body).expect("translator sent invalid JSON");
            self.requests.lock().unwrap().push(Recorded {
                index: index.to_string(),
                body,
            });

            match &self.reply {
                Reply::Body(value) => Ok(serde_json::to_vec(value).unwrap()),
                Reply::Raw(bytes) => Ok(bytes.clone()),
                Reply::Unavailable => Err(Error::store_unavailable("connection refused")),
                Reply::Hang => futures::future::pending().await,
            }
        }
        .boxed()
    }
}

/// Build a search context over a store with default test settings.
pub fn context_for(store: Arc<FakeStore>) -> SearchContext {
    context_with_timeout(store, Duration::from_secs(5))
}

pub fn context_with_timeout(store: Arc<FakeStore>, timeout: Duration) -> SearchContext {
    torrent_search::tracing::init_for_tests();
    SearchContext::new(
        store,
        SearchSettings {
            index: INDEX.to_string(),
            page_size: PAGE_SIZE,
            timeout,
        },
    )
}

/// A store search response envelope.
pub fn envelope(total: u64, hits: Vec<Value>) -> Value {
    json!({
        "took": 2,
        "timed_out": false,
        "hits": {
            "total": { "value": total, "relation": "eq" },
            "max_score": 1.0,
            "hits": hits
        }
    })
}

/// A well-formed torrent document.
pub fn torrent_source(info_hash: &str, name: &str) -> Value {
    json!({
        "info_hash": info_hash,
        "name": name,
        "files": [
            { "path": "Episode.01.mkv", "length": 734_003_200 },
            { "path": "Episode.02.mkv", "length": 681_574_400 }
        ],
        "total_size": 1_415_577_600u64,
        "file_count": 2,
        "create_date": "2024-11-03T12:00:00Z"
    })
}

/// A hit wrapping a well-formed torrent document.
pub fn torrent_hit(info_hash: &str, name: &str) -> Value {
    json!({
        "_index": INDEX,
        "_id": info_hash,
        "_score": 2.5,
        "_source": torrent_source(info_hash, name)
    })
}

/// Store holding a single matching torrent.
#[fixture]
pub fn single_hit_store() -> Arc<FakeStore> {
    FakeStore::with_hits(1, vec![torrent_hit("a1b2c3", "The Matrix 1999 1080p")])
}

/// Store with no matches.
#[fixture]
pub fn empty_store() -> Arc<FakeStore> {
    FakeStore::with_hits(0, vec![])
}
