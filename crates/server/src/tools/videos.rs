//! Video tools: chart listing, search, details, related videos and categories.
//!
//! Every listing is written into the store so `app_state` reflects what was
//! last shown. Failures set the store's inline error and surface as a tool error.

use chrono::Utc;
use mytube_core::format::{format_duration, format_publish_date, format_time_ago, format_view_count};
use mytube_core::model::ALL_CATEGORY;
use mytube_core::state::VideoAction;
use mytube_core::{Action, Category, Error, Page, Video};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::context::AppContext;

const DEFAULT_RELATED: usize = 10;
const MAX_RELATED: usize = 50;

/// Parameters for the videos_list tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideosListParams {
    /// Category name (e.g. "Music") or id (e.g. "10"). Omit or "All" for the full chart.
    #[serde(default)]
    pub category: Option<String>,
}

/// Parameters for the videos_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideosSearchParams {
    /// Search query.
    pub query: String,
}

/// Parameters for the video_details tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideoDetailsParams {
    pub video_id: String,
}

/// Parameters for the videos_related tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideosRelatedParams {
    /// Video currently being watched; excluded from the results.
    pub video_id: String,

    /// Maximum videos to return (1-50, default 10).
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Parameters for the video_categories tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideoCategoriesParams {
    /// Ask the API for the region's categories instead of the built-in list.
    #[serde(default)]
    pub remote: bool,
}

/// A video as a card would show it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoCard {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    /// e.g. "1.2M views"
    pub views: String,
    /// e.g. "4:13"; empty when unknown.
    pub duration: String,
    /// e.g. "3 days ago"; empty when unknown.
    pub published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub url: String,
}

impl From<&Video> for VideoCard {
    fn from(video: &Video) -> Self {
        let now = Utc::now();
        Self {
            id: video.id.clone(),
            title: video.title.clone(),
            channel_title: video.channel_title.clone(),
            views: format_view_count(video.view_count),
            duration: video.duration.as_deref().map(format_duration).unwrap_or_default(),
            published: video.published_at.map(|at| format_time_ago(at, now)).unwrap_or_default(),
            thumbnail_url: video.thumbnail_url.clone(),
            url: video.watch_url(),
        }
    }
}

/// Output of the listing tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoListOutput {
    /// Category name for chart listings, query for searches.
    pub label: String,
    pub count: usize,
    pub videos: Vec<VideoCard>,
}

impl VideoListOutput {
    fn new(label: impl Into<String>, videos: &[Video]) -> Self {
        Self { label: label.into(), count: videos.len(), videos: videos.iter().map(VideoCard::from).collect() }
    }
}

/// Output of the video_details tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoDetailsOutput {
    pub card: VideoCard,
    pub description: String,
    /// e.g. "Jan 15, 2024"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    pub video: Video,
}

/// Output of the video_categories tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoCategoriesOutput {
    pub selected: String,
    pub categories: Vec<Category>,
}

/// Implementation of the videos_list tool.
pub async fn list_impl(ctx: &AppContext, params: VideosListParams) -> Result<CallToolResult, McpError> {
    let requested = params.category.as_deref().map(str::trim).unwrap_or_default();
    let lookup = if requested.is_empty() { ALL_CATEGORY } else { requested };
    let category = Category::resolve(lookup).ok_or_else(|| Error::InvalidInput(format!("unknown category: {lookup}")))?;

    let source = ctx.videos()?;
    ctx.store.dispatch(VideoAction::SetSelectedCategory(category.name.clone()));
    ctx.store.dispatch(VideoAction::ClearSearchResults);
    ctx.store.dispatch(VideoAction::SetLoading(true));

    match source.popular(category.id.as_deref()).await {
        Ok(videos) => {
            tracing::debug!(category = %category.name, count = videos.len(), "loaded popular videos");
            let output = VideoListOutput::new(&category.name, &videos);
            ctx.store.dispatch(VideoAction::SetVideos(videos));
            json_result(&output)
        }
        Err(e) => {
            tracing::warn!(category = %category.name, error = %e, "failed to load videos");
            ctx.store.dispatch(VideoAction::SetError("Failed to load videos".into()));
            Err(Error::from(e).into())
        }
    }
}

/// Implementation of the videos_search tool.
pub async fn search_impl(ctx: &AppContext, params: VideosSearchParams) -> Result<CallToolResult, McpError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".into()).into());
    }

    let source = ctx.videos()?;
    ctx.store.dispatch(VideoAction::SetSearchQuery(query.to_string()));
    ctx.store.dispatch(VideoAction::SetLoading(true));

    match source.search(query).await {
        Ok(videos) => {
            let output = VideoListOutput::new(query, &videos);
            ctx.store.dispatch(VideoAction::SetSearchResults(videos));
            json_result(&output)
        }
        Err(e) => {
            tracing::warn!(query, error = %e, "video search failed");
            ctx.store.dispatch(VideoAction::SetError("Failed to search videos".into()));
            Err(Error::from(e).into())
        }
    }
}

/// Implementation of the video_details tool. Navigates to the watch page.
pub async fn details_impl(ctx: &AppContext, params: VideoDetailsParams) -> Result<CallToolResult, McpError> {
    let video_id = params.video_id.trim();
    if video_id.is_empty() {
        return Err(Error::InvalidInput("video_id cannot be empty".into()).into());
    }

    let video = ctx
        .videos()?
        .details(video_id)
        .await
        .map_err(Error::from)?
        .ok_or_else(|| Error::NotFound(format!("video {video_id}")))?;

    ctx.store.dispatch(Action::Navigate(Page::Watch { video_id: video.id.clone() }));

    let output = VideoDetailsOutput {
        card: VideoCard::from(&video),
        description: video.description.clone(),
        published_date: video.published_at.map(format_publish_date),
        like_count: video.like_count,
        comment_count: video.comment_count,
        video,
    };
    json_result(&output)
}

/// Implementation of the videos_related tool: the chart minus the current video.
pub async fn related_impl(ctx: &AppContext, params: VideosRelatedParams) -> Result<CallToolResult, McpError> {
    let limit = params.limit.unwrap_or(DEFAULT_RELATED);
    if !(1..=MAX_RELATED).contains(&limit) {
        return Err(Error::InvalidInput(format!("limit must be 1-{MAX_RELATED}")).into());
    }

    let current = params.video_id.trim();
    let videos = ctx.videos()?.popular(None).await.map_err(|e| {
        tracing::warn!(video_id = current, error = %e, "failed to load related videos");
        Error::from(e)
    })?;

    let related: Vec<Video> = videos.into_iter().filter(|v| v.id != current).take(limit).collect();
    json_result(&VideoListOutput::new(format!("related:{current}"), &related))
}

/// Implementation of the video_categories tool.
pub async fn categories_impl(ctx: &AppContext, params: VideoCategoriesParams) -> Result<CallToolResult, McpError> {
    let categories = if params.remote {
        let mut remote = ctx.videos()?.categories().await.map_err(Error::from)?;
        remote.insert(0, Category { id: None, name: ALL_CATEGORY.to_string() });
        remote
    } else {
        Category::builtin()
    };

    let selected = ctx.store.select(|s| s.videos.selected_category.clone());
    json_result(&VideoCategoriesOutput { selected, categories })
}
