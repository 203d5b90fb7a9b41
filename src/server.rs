//! MCP server exposing torrent search tools.

use crate::context::SearchContext;
use crate::tools::get_torrent::{GetTorrentRequest, handle_get_torrent};
use crate::tools::search::{SearchTorrentsRequest, handle_search};
use rmcp::{
    RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for torrent metadata search
#[derive(Clone)]
pub struct TorrentServer {
    /// Shared search context (store handle and settings)
    context: Arc<SearchContext>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for TorrentServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TorrentServer")
            .field("context", &self.context)
            .finish()
    }
}

#[tool_router]
impl TorrentServer {
    pub fn new(context: SearchContext) -> Self {
        Self {
            context: Arc::new(context),
            tool_router: Self::tool_router(),
        }
    }

    pub fn context(&self) -> &Arc<SearchContext> {
        &self.context
    }

    #[tool(
        description = "Search torrent metadata by name and file paths. Returns one page of results as JSON with total, page, per_page and results. Leave q empty to list everything, or use 'info_hash:<hash>' for an exact lookup. Sort by date, size or files in asc or desc order."
    )]
    async fn search_torrents(
        &self,
        Parameters(request): Parameters<SearchTorrentsRequest>,
        ctx: RequestContext<RoleServer>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.context, request, &ctx.ct).await
    }

    #[tool(
        description = "Fetch the full metadata of a single torrent (name, files, total size, file count, creation date) by its info hash."
    )]
    async fn get_torrent(
        &self,
        Parameters(request): Parameters<GetTorrentRequest>,
        ctx: RequestContext<RoleServer>,
    ) -> std::result::Result<String, String> {
        handle_get_torrent(&self.context, request, &ctx.ct).await
    }
}

#[tool_handler]
impl ServerHandler for TorrentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(format!(
                "torrent-search: searches torrent metadata in the '{}' index, {} results per page. \
                 Use search_torrents for text search and listing, get_torrent for a single info hash.",
                self.context.settings().index,
                self.context.settings().page_size
            ))
    }
}
