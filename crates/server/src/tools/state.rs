//! UI state tools: inspect the store, navigate between pages, toggle the sidebar.

use mytube_core::{Action, AppState, Error, Page};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use super::videos::VideoCard;
use crate::context::AppContext;

/// Parameters for the navigate tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NavigateParams {
    /// "home", "watch" or "metrics".
    pub page: String,

    /// Required when page is "watch".
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Summary of the application state.
#[derive(Debug, Clone, Serialize)]
pub struct AppStateOutput {
    pub page: Page,
    pub menu_open: bool,
    pub selected_category: String,
    pub search_query: String,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Search results when present, otherwise the chart.
    pub display_videos: Vec<VideoCard>,
    pub cached_queries: usize,
    pub chat_messages: usize,
}

impl From<&AppState> for AppStateOutput {
    fn from(state: &AppState) -> Self {
        Self {
            page: state.ui.page.clone(),
            menu_open: state.ui.menu_open,
            selected_category: state.videos.selected_category.clone(),
            search_query: state.videos.search_query.clone(),
            loading: state.videos.loading,
            error: state.videos.error.clone(),
            display_videos: state.videos.display_videos().iter().map(VideoCard::from).collect(),
            cached_queries: state.search.len(),
            chat_messages: state.chat.messages.len(),
        }
    }
}

/// Parse a page name into a [`Page`].
fn parse_page(params: &NavigateParams) -> Result<Page, Error> {
    match params.page.trim().to_ascii_lowercase().as_str() {
        "home" => Ok(Page::Home),
        "metrics" => Ok(Page::Metrics),
        "watch" => {
            let video_id = params
                .video_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| Error::InvalidInput("video_id is required for the watch page".into()))?;
            Ok(Page::Watch { video_id: video_id.to_string() })
        }
        other => Err(Error::InvalidInput(format!("unknown page: {other} (expected home, watch or metrics)"))),
    }
}

/// Implementation of the app_state tool.
pub async fn state_impl(ctx: &AppContext) -> Result<CallToolResult, McpError> {
    let output = ctx.store.select(|state| AppStateOutput::from(state));
    json_result(&output)
}

/// Implementation of the navigate tool.
pub async fn navigate_impl(ctx: &AppContext, params: NavigateParams) -> Result<CallToolResult, McpError> {
    let page = parse_page(&params)?;
    ctx.store.dispatch(Action::Navigate(page));
    state_impl(ctx).await
}

/// Implementation of the toggle_menu tool.
pub async fn toggle_menu_impl(ctx: &AppContext) -> Result<CallToolResult, McpError> {
    ctx.store.dispatch(Action::ToggleMenu);
    let menu_open = ctx.store.select(|s| s.ui.menu_open);
    json_result(&serde_json::json!({ "menu_open": menu_open }))
}
