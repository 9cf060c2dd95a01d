//! Video, category and chat models shared by the client and the server.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Normalized video resource.
///
/// Built from either a `videos.list` item or a `search.list` item; search
/// results carry no statistics or content details, so those fields stay empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_id: Option<String>,
    pub channel_title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnail_url: Option<String>,
    /// ISO-8601 duration as sent by the API (e.g. `PT4M13S`).
    pub duration: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub category_id: Option<String>,
}

impl Video {
    /// Public watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

/// A video category chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Category {
    /// API category id; `None` for the "All" pseudo-category.
    pub id: Option<String>,
    pub name: String,
}

/// Name of the pseudo-category that lists the unfiltered chart.
pub const ALL_CATEGORY: &str = "All";

const BUILTIN_CATEGORIES: &[(&str, Option<&str>)] = &[
    (ALL_CATEGORY, None),
    ("Music", Some("10")),
    ("Gaming", Some("20")),
    ("Sports", Some("17")),
    ("Entertainment", Some("24")),
    ("News", Some("25")),
    ("Education", Some("27")),
    ("Science & Technology", Some("28")),
    ("Comedy", Some("23")),
    ("Film & Animation", Some("1")),
    ("Autos & Vehicles", Some("2")),
    ("Pets & Animals", Some("15")),
    ("Travel & Events", Some("19")),
    ("People & Blogs", Some("22")),
];

impl Category {
    /// The built-in category chips, "All" first.
    pub fn builtin() -> Vec<Category> {
        BUILTIN_CATEGORIES
            .iter()
            .map(|(name, id)| Category { id: id.map(str::to_string), name: (*name).to_string() })
            .collect()
    }

    /// Resolve a category by name (case-insensitive) or by API id.
    pub fn resolve(name_or_id: &str) -> Option<Category> {
        let needle = name_or_id.trim();
        Self::builtin()
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(needle) || c.id.as_deref() == Some(needle))
    }

    pub fn is_all(&self) -> bool {
        self.id.is_none()
    }
}

/// A single live chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessage {
    pub name: String,
    pub text: String,
}

impl ChatMessage {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }
}
