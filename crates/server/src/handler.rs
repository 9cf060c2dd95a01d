//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

use crate::context::AppContext;
use crate::tools::{
    ChatMessagesParams, ChatSendParams, MetricsDownloadParams, MetricsRunParams, NavigateParams, SearchInputParams,
    SearchSuggestParams, VideoCategoriesParams, VideoCommentsParams, VideoDetailsParams, VideosListParams,
    VideosRelatedParams, VideosSearchParams, chat, comments, metrics, state, suggest, videos,
};

/// The main MCP server handler for mytube.
#[derive(Clone)]
pub struct MyTubeServer {
    ctx: Arc<AppContext>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl MyTubeServer {
    /// Create a new server handler over a shared context.
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx, tool_router: Self::tool_router() }
    }

    #[tool(
        description = "List popular videos, optionally for one category (\"Music\" or \"10\"). Updates the home feed."
    )]
    async fn videos_list(&self, params: Parameters<VideosListParams>) -> Result<CallToolResult, McpError> {
        videos::list_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Search videos by keyword. Results replace the home feed until cleared.")]
    async fn videos_search(&self, params: Parameters<VideosSearchParams>) -> Result<CallToolResult, McpError> {
        videos::search_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Get one video's details and open its watch page.")]
    async fn video_details(&self, params: Parameters<VideoDetailsParams>) -> Result<CallToolResult, McpError> {
        videos::details_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Popular videos to show next to a video, excluding the video itself.")]
    async fn videos_related(&self, params: Parameters<VideosRelatedParams>) -> Result<CallToolResult, McpError> {
        videos::related_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Threaded comments for a video, replies nested under their parent.")]
    async fn video_comments(&self, params: Parameters<VideoCommentsParams>) -> Result<CallToolResult, McpError> {
        comments::comments_impl(&self.ctx, params.0).await
    }

    #[tool(description = "List video categories. Built-in list by default; set remote to ask the API.")]
    async fn video_categories(&self, params: Parameters<VideoCategoriesParams>) -> Result<CallToolResult, McpError> {
        videos::categories_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Search suggestions for a query, served from the session cache when the query was seen.")]
    async fn search_suggest(&self, params: Parameters<SearchSuggestParams>) -> Result<CallToolResult, McpError> {
        suggest::suggest_impl(&self.ctx, params.0).await
    }

    #[tool(
        description = "Type into the search box. Suggestions are debounced; returns the suggestions published so far."
    )]
    async fn search_input(&self, params: Parameters<SearchInputParams>) -> Result<CallToolResult, McpError> {
        suggest::input_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Send a live chat message.")]
    async fn chat_send(&self, params: Parameters<ChatSendParams>) -> Result<CallToolResult, McpError> {
        chat::send_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Read the newest live chat messages, oldest first.")]
    async fn chat_messages(&self, params: Parameters<ChatMessagesParams>) -> Result<CallToolResult, McpError> {
        chat::messages_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Run the simulated performance tests and return the metrics report.")]
    async fn metrics_run(&self, params: Parameters<MetricsRunParams>) -> Result<CallToolResult, McpError> {
        metrics::run_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Run the simulated performance tests and write mytube-metrics-YYYY-MM-DD.json.")]
    async fn metrics_download(&self, params: Parameters<MetricsDownloadParams>) -> Result<CallToolResult, McpError> {
        metrics::download_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Current page, sidebar, feed, search and chat state.")]
    async fn app_state(&self) -> Result<CallToolResult, McpError> {
        state::state_impl(&self.ctx).await
    }

    #[tool(description = "Go to a page: home, watch (needs video_id) or metrics.")]
    async fn navigate(&self, params: Parameters<NavigateParams>) -> Result<CallToolResult, McpError> {
        state::navigate_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Open or close the sidebar menu.")]
    async fn toggle_menu(&self) -> Result<CallToolResult, McpError> {
        state::toggle_menu_impl(&self.ctx).await
    }
}

impl ServerHandler for MyTubeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mytube-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Browse videos with videos_list, videos_search and video_details. \
                 Type with search_input for debounced suggestions. Run metrics_run for the performance report."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
