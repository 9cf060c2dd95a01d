//! Shared state handed to every tool call.

use std::sync::Arc;

use mytube_client::{
    LiveChatFeed, SuggestClient, SuggestionDebouncer, SuggestionFetcher, SuggestionSource, VideoSource, YoutubeClient,
    YoutubeError,
};
use mytube_core::{AppConfig, AppState, Error, Store, SuggestionStore};

/// Everything a tool needs: config, the one store, and the network sources.
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<Store>,
    /// `None` until an API key is configured.
    videos: Option<Arc<dyn VideoSource>>,
    pub suggestions: SuggestionFetcher,
    pub debouncer: SuggestionDebouncer,
}

impl AppContext {
    /// Build from explicit sources. Must be called inside a tokio runtime.
    pub fn new(
        config: AppConfig, videos: Option<Arc<dyn VideoSource>>, suggest_source: Arc<dyn SuggestionSource>,
    ) -> Self {
        let store = Arc::new(Store::new(AppState::with_chat_retention(config.chat_retain)));
        let cache: Arc<dyn SuggestionStore> = store.clone();
        let suggestions = SuggestionFetcher::new(suggest_source, cache);
        let debouncer = SuggestionDebouncer::spawn(suggestions.clone(), config.suggest_debounce());

        Self { config, store, videos, suggestions, debouncer }
    }

    /// Build the HTTP-backed context. A missing API key is not an error here;
    /// video tools report it when called.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let videos: Option<Arc<dyn VideoSource>> = match YoutubeClient::from_app(&config) {
            Ok(client) => Some(Arc::new(client)),
            Err(YoutubeError::MissingApiKey) => {
                tracing::warn!("no YouTube API key configured; video tools are disabled");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let suggest = SuggestClient::from_app(&config)?;
        Ok(Self::new(config, videos, Arc::new(suggest)))
    }

    /// The video source, or `API_KEY_MISSING`.
    pub fn videos(&self) -> Result<&Arc<dyn VideoSource>, Error> {
        self.videos.as_ref().ok_or_else(|| {
            Error::MissingApiKey("set MYTUBE_YOUTUBE_API_KEY to enable video tools".into())
        })
    }

    /// Start the simulated chat feed if enabled.
    pub fn spawn_live_chat(&self) -> Option<LiveChatFeed> {
        if !self.config.live_chat_enabled {
            return None;
        }
        Some(LiveChatFeed::spawn(Arc::clone(&self.store), self.config.live_chat_interval(), None))
    }
}
