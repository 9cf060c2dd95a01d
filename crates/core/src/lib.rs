//! Core types and shared functionality for mytube.
//!
//! This crate provides:
//! - Application state and pure reducers
//! - In-memory suggestion cache
//! - Video, category, chat and comment models plus display formatting
//! - Metrics report schema and scoring
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod comments;
pub mod config;
pub mod error;
pub mod format;
pub mod metrics;
pub mod model;
pub mod state;

pub use cache::{SharedSuggestionCache, SuggestionCache, SuggestionStore};
pub use comments::Comment;
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use metrics::MetricsReport;
pub use model::{Category, ChatMessage, Video};
pub use state::{Action, AppState, Page, Store};
