//! Client code for mytube.
//!
//! This crate provides the YouTube Data API client, the debounced and cached
//! search-suggestion pipeline, the simulated live chat feed, and the simulated
//! metrics harness shared by the server.

pub mod chat;
pub mod harness;
pub mod suggest;
pub mod youtube;

pub use chat::LiveChatFeed;
pub use harness::HarnessOptions;
pub use suggest::{
    Lookup, Origin, SuggestClient, SuggestError, SuggestionDebouncer, SuggestionFetcher, SuggestionSource,
    Suggestions,
};
pub use youtube::{VideoSource, YoutubeClient, YoutubeConfig, YoutubeError};
