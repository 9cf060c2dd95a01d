//! Video list slice: chart, search results, loading and error flags.

use serde::{Deserialize, Serialize};

use crate::model::{ALL_CATEGORY, Video};

/// Single mutable snapshot of the video listing; every field is last-write-wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoListState {
    pub videos: Vec<Video>,
    pub search_results: Vec<Video>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_query: String,
    pub selected_category: String,
}

impl Default for VideoListState {
    fn default() -> Self {
        Self {
            videos: Vec::new(),
            search_results: Vec::new(),
            loading: false,
            error: None,
            search_query: String::new(),
            selected_category: ALL_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VideoAction {
    SetVideos(Vec<Video>),
    SetSearchResults(Vec<Video>),
    SetLoading(bool),
    SetError(String),
    SetSearchQuery(String),
    SetSelectedCategory(String),
    ClearSearchResults,
}

impl VideoListState {
    pub fn reduce(mut self, action: VideoAction) -> Self {
        match action {
            VideoAction::SetVideos(items) => {
                self.videos = items;
                self.loading = false;
                self.error = None;
            }
            VideoAction::SetSearchResults(items) => {
                self.search_results = items;
                self.loading = false;
                self.error = None;
            }
            VideoAction::SetLoading(loading) => self.loading = loading,
            VideoAction::SetError(message) => {
                self.error = Some(message);
                self.loading = false;
            }
            VideoAction::SetSearchQuery(query) => self.search_query = query,
            VideoAction::SetSelectedCategory(name) => self.selected_category = name,
            VideoAction::ClearSearchResults => {
                self.search_results.clear();
                self.search_query.clear();
            }
        }
        self
    }

    /// Search results take precedence over the chart when there are any.
    pub fn display_videos(&self) -> &[Video] {
        if self.search_results.is_empty() { &self.videos } else { &self.search_results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str) -> Video {
        Video { id: id.into(), title: format!("Video {id}"), ..Default::default() }
    }

    #[test]
    fn test_default_category_is_all() {
        let state = VideoListState::default();
        assert_eq!(state.selected_category, "All");
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_set_videos_clears_loading_and_error() {
        let state = VideoListState::default()
            .reduce(VideoAction::SetError("Failed to load videos".into()))
            .reduce(VideoAction::SetLoading(true))
            .reduce(VideoAction::SetVideos(vec![video("a")]));

        assert_eq!(state.videos.len(), 1);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_set_error_stops_loading() {
        let state = VideoListState::default()
            .reduce(VideoAction::SetLoading(true))
            .reduce(VideoAction::SetError("boom".into()));

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_display_prefers_search_results() {
        let state = VideoListState::default().reduce(VideoAction::SetVideos(vec![video("a"), video("b")]));
        assert_eq!(state.display_videos().len(), 2);

        let state = state.reduce(VideoAction::SetSearchResults(vec![video("s")]));
        assert_eq!(state.display_videos()[0].id, "s");

        let state = state
            .reduce(VideoAction::SetSearchQuery("cats".into()))
            .reduce(VideoAction::ClearSearchResults);
        assert!(state.search_query.is_empty());
        assert_eq!(state.display_videos().len(), 2);
    }

    #[test]
    fn test_last_write_wins() {
        let state = VideoListState::default()
            .reduce(VideoAction::SetSelectedCategory("Music".into()))
            .reduce(VideoAction::SetSelectedCategory("Gaming".into()));
        assert_eq!(state.selected_category, "Gaming");
    }
}
