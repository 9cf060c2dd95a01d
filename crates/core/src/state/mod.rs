//! Application state and pure reducers.
//!
//! `AppState::reduce` is a pure function from `(state, action)` to the next
//! state. [`Store`] wraps one `AppState` behind a lock so that every dispatch
//! applies exactly one action at a time; callers share it through `Arc<Store>`.

pub mod chat;
pub mod videos;

use std::sync::{PoisonError, RwLock};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cache::{SuggestionCache, SuggestionStore};
use crate::model::ChatMessage;

pub use chat::ChatState;
pub use videos::{VideoAction, VideoListState};

/// Which view is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Watch {
        video_id: String,
    },
    Metrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub menu_open: bool,
    pub page: Page,
}

impl Default for UiState {
    fn default() -> Self {
        Self { menu_open: true, page: Page::Home }
    }
}

/// The whole client state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub ui: UiState,
    pub videos: VideoListState,
    pub search: SuggestionCache,
    pub chat: ChatState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleMenu,
    CloseMenu,
    Navigate(Page),
    Video(VideoAction),
    CacheResults { query: String, items: Vec<String> },
    AddMessage(ChatMessage),
}

impl From<VideoAction> for Action {
    fn from(action: VideoAction) -> Self {
        Action::Video(action)
    }
}

impl AppState {
    pub fn with_chat_retention(retain: Option<usize>) -> Self {
        Self { chat: ChatState::with_retention(retain), ..Default::default() }
    }

    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::ToggleMenu => self.ui.menu_open = !self.ui.menu_open,
            Action::CloseMenu => self.ui.menu_open = false,
            Action::Navigate(page) => {
                // The watch page always opens with the sidebar collapsed.
                if matches!(page, Page::Watch { .. }) {
                    self.ui.menu_open = false;
                }
                self.ui.page = page;
            }
            Action::Video(action) => self.videos = self.videos.reduce(action),
            Action::CacheResults { query, items } => self.search.insert(query, items),
            Action::AddMessage(message) => self.chat = self.chat.add(message),
        }
        self
    }
}

/// Lock-guarded holder of the one `AppState`.
#[derive(Debug, Default)]
pub struct Store {
    state: RwLock<AppState>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state: RwLock::new(state) }
    }

    /// Apply one action.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        tracing::trace!(?action, "dispatch");

        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let current = std::mem::take(&mut *guard);
        *guard = current.reduce(action);
    }

    /// Read a projection of the current state without cloning all of it.
    pub fn select<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn snapshot(&self) -> AppState {
        self.select(AppState::clone)
    }
}

impl SuggestionStore for Store {
    fn lookup(&self, query: &str) -> Option<Vec<String>> {
        self.select(|s| s.search.get(query).map(<[String]>::to_vec))
    }

    fn store(&self, query: &str, items: Vec<String>) {
        self.dispatch(Action::CacheResults { query: query.to_string(), items });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Video;
    use std::sync::Arc;

    #[test]
    fn test_initial_state() {
        let state = AppState::default();
        assert!(state.ui.menu_open);
        assert_eq!(state.ui.page, Page::Home);
        assert!(state.search.is_empty());
        assert!(state.chat.messages.is_empty());
    }

    #[test]
    fn test_menu_actions() {
        let state = AppState::default().reduce(Action::ToggleMenu);
        assert!(!state.ui.menu_open);

        let state = state.reduce(Action::ToggleMenu);
        assert!(state.ui.menu_open);

        let state = state.reduce(Action::CloseMenu).reduce(Action::CloseMenu);
        assert!(!state.ui.menu_open);
    }

    #[test]
    fn test_navigate_to_watch_closes_menu() {
        let state = AppState::default().reduce(Action::Navigate(Page::Watch { video_id: "abc".into() }));
        assert!(!state.ui.menu_open);
        assert_eq!(state.ui.page, Page::Watch { video_id: "abc".into() });

        let state = state.reduce(Action::ToggleMenu).reduce(Action::Navigate(Page::Metrics));
        assert!(state.ui.menu_open);
        assert_eq!(state.ui.page, Page::Metrics);
    }

    #[test]
    fn test_video_action_routes_to_slice() {
        let state = AppState::default().reduce(
            VideoAction::SetVideos(vec![Video { id: "v1".into(), ..Default::default() }]).into(),
        );
        assert_eq!(state.videos.videos.len(), 1);
    }

    #[test]
    fn test_cache_results_overwrites() {
        let state = AppState::default()
            .reduce(Action::CacheResults { query: "rea".into(), items: vec!["react".into()] })
            .reduce(Action::CacheResults { query: "rea".into(), items: vec!["real".into()] });

        assert_eq!(state.search.get("rea").unwrap(), ["real".to_string()].as_slice());
    }

    #[test]
    fn test_chat_retention_from_constructor() {
        let state = (0..4).fold(AppState::with_chat_retention(Some(2)), |s, i| {
            s.reduce(Action::AddMessage(ChatMessage::new("bot", i.to_string())))
        });
        assert_eq!(state.chat.messages.len(), 2);
    }

    #[test]
    fn test_store_dispatch_and_select() {
        let store = Store::default();
        store.dispatch(VideoAction::SetLoading(true));
        store.dispatch(Action::AddMessage(ChatMessage::new("Harsh", "hello")));

        assert!(store.select(|s| s.videos.loading));
        assert_eq!(store.snapshot().chat.messages.len(), 1);
    }

    #[test]
    fn test_store_as_suggestion_store() {
        let store = Store::default();
        assert!(store.lookup("rust").is_none());

        store.store("rust", vec!["rust lang".into()]);
        assert_eq!(store.lookup("rust"), Some(vec!["rust lang".to_string()]));
        assert!(store.snapshot().search.contains("rust"));
    }

    #[test]
    fn test_store_concurrent_dispatch() {
        let store = Arc::new(Store::default());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.dispatch(Action::AddMessage(ChatMessage::new(format!("t{t}"), i.to_string())));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.select(|s| s.chat.messages.len()), 400);
    }

    #[test]
    fn test_page_serializes_tagged() {
        let json = serde_json::to_value(Page::Watch { video_id: "abc".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "watch", "video_id": "abc" }));
    }
}
