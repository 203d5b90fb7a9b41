use anyhow::Context;
use rmcp::{ServiceExt, transport::stdio};
use std::path::PathBuf;
use std::sync::Arc;
use torrent_search::config::CONFIG_ENV;
use torrent_search::{AppConfig, ElasticClient, SearchContext, TorrentServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let (config, source) = AppConfig::discover(explicit.as_deref())?;

    // Logs go to stderr; stdout carries the MCP protocol
    torrent_search::tracing::init(&config.logging);

    match &source {
        Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
        None => tracing::info!("No configuration file found, using defaults"),
    }

    let client = ElasticClient::new(&config.elasticsearch.host, config.elasticsearch.timeout())?;
    client
        .ping()
        .await
        .with_context(|| format!("Document store at {} is not reachable", client.base_url()))?;
    tracing::info!(
        host = %client.base_url(),
        index = %config.elasticsearch.index,
        page_size = config.pagination.page_size,
        "Connected to document store"
    );

    let context = SearchContext::new(Arc::new(client), config.search_settings());
    let server = TorrentServer::new(context);

    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
