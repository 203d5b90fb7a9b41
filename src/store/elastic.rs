//! Elasticsearch-compatible HTTP client.

use super::DocumentStore;
use crate::error::{Error, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for a store speaking the Elasticsearch `_search` API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ElasticClient {
    /// Store root, always ending in `/` so index paths join beneath it
    base_url: Url,
    http: reqwest::Client,
    timeout: Duration,
}

impl ElasticClient {
    /// Create a client for the store at `host` with a per-request timeout.
    pub fn new(host: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(host).map_err(|e| {
            Error::store_unavailable(format!("invalid store host '{}': {}", host, e))
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::store_unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the search endpoint for `index`.
    ///
    /// The index is pushed as a single percent-encoded path segment, so `/`,
    /// `?` or `#` in the name cannot escape the store root.
    pub fn search_url(&self, index: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::store_unavailable(format!("store host '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .push(index)
            .push("_search");
        Ok(url)
    }

    /// Check that the store answers on its root endpoint.
    pub async fn ping(&self) -> Result<()> {
        let response = self
            .http
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::store_unavailable(format!(
                "health check returned {}: {}",
                status, body
            )));
        }

        debug!(url = %self.base_url, "Document store is reachable");
        Ok(())
    }

    async fn post_search(&self, index: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let url = self.search_url(index)?;
        debug!(%url, body_len = body.len(), "Dispatching search");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::store_unavailable(format!(
                "search returned {}: {}",
                status, body
            )));
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        Ok(bytes.to_vec())
    }

    fn transport_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout {
                timeout: self.timeout,
                source: Some(error),
            }
        } else {
            Error::from(error)
        }
    }
}

impl DocumentStore for ElasticClient {
    fn search<'a>(&'a self, index: &'a str, body: Vec<u8>) -> BoxFuture<'a, Result<Vec<u8>>> {
        self.post_search(index, body).boxed()
    }
}
