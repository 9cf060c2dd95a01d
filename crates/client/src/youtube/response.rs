//! YouTube Data API response types and normalization.

use chrono::{DateTime, Utc};
use mytube_core::{Category, Video};
use serde::Deserialize;

/// Raw list envelope shared by `videos.list`, `search.list` and `videoCategories.list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// `videos.list` returns a plain id; `search.list` nests it under `videoId`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Plain(String),
    Search {
        #[serde(rename = "videoId")]
        video_id: Option<String>,
    },
}

impl ResourceId {
    fn into_video_id(self) -> Option<String> {
        match self {
            ResourceId::Plain(id) => Some(id),
            ResourceId::Search { video_id } => video_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: ResourceId,
    #[serde(default)]
    pub snippet: Option<Snippet>,
    #[serde(default)]
    pub content_details: Option<ContentDetails>,
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentDetails {
    pub duration: Option<String>,
}

/// Counts arrive as decimal strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryItem {
    pub id: String,
    pub snippet: CategorySnippet,
}

#[derive(Debug, Deserialize)]
pub struct CategorySnippet {
    pub title: String,
    #[serde(default = "default_assignable")]
    pub assignable: bool,
}

fn default_assignable() -> bool {
    true
}

fn parse_count(raw: Option<&String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse().ok())
}

impl Thumbnails {
    /// Largest available thumbnail.
    fn best(&self) -> Option<&str> {
        self.high
            .as_ref()
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.as_str())
    }
}

impl VideoItem {
    /// Normalize into a [`Video`]. Items without a video id (channels, playlists) yield `None`.
    pub fn into_video(self) -> Option<Video> {
        let id = self.id.into_video_id()?;
        let snippet = self.snippet.unwrap_or_default();
        let stats = self.statistics.as_ref();

        Some(Video {
            id,
            title: snippet.title,
            description: snippet.description,
            channel_id: snippet.channel_id,
            channel_title: snippet.channel_title,
            published_at: snippet.published_at,
            thumbnail_url: snippet.thumbnails.as_ref().and_then(Thumbnails::best).map(str::to_string),
            duration: self.content_details.and_then(|d| d.duration),
            view_count: parse_count(stats.and_then(|s| s.view_count.as_ref())),
            like_count: parse_count(stats.and_then(|s| s.like_count.as_ref())),
            comment_count: parse_count(stats.and_then(|s| s.comment_count.as_ref())),
            category_id: snippet.category_id,
        })
    }
}

impl From<ListResponse<VideoItem>> for Vec<Video> {
    fn from(raw: ListResponse<VideoItem>) -> Self {
        raw.items.into_iter().filter_map(VideoItem::into_video).collect()
    }
}

impl From<ListResponse<CategoryItem>> for Vec<Category> {
    /// Assignable categories only; the API lists some that no video can carry.
    fn from(raw: ListResponse<CategoryItem>) -> Self {
        raw.items
            .into_iter()
            .filter(|c| c.snippet.assignable)
            .map(|c| Category { id: Some(c.id), name: c.snippet.title })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIDEOS_FIXTURE: &str = r#"{
        "kind": "youtube#videoListResponse",
        "nextPageToken": "CAUQAA",
        "items": [
            {
                "id": "dQw4w9WgXcQ",
                "snippet": {
                    "publishedAt": "2009-10-25T06:57:33Z",
                    "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                    "title": "Never Gonna Give You Up",
                    "description": "The official video",
                    "channelTitle": "Rick Astley",
                    "categoryId": "10",
                    "thumbnails": {
                        "default": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg" },
                        "high": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg" }
                    }
                },
                "contentDetails": { "duration": "PT3M33S" },
                "statistics": { "viewCount": "1500000000", "likeCount": "18000000", "commentCount": "n/a" }
            }
        ]
    }"#;

    const SEARCH_FIXTURE: &str = r#"{
        "items": [
            {
                "id": { "kind": "youtube#video", "videoId": "abc123" },
                "snippet": { "title": "Rust in 100 seconds", "channelTitle": "Fireship" }
            },
            {
                "id": { "kind": "youtube#channel", "channelId": "UC123" },
                "snippet": { "title": "A channel" }
            }
        ]
    }"#;

    #[test]
    fn test_normalize_videos_list() {
        let raw: ListResponse<VideoItem> = serde_json::from_str(VIDEOS_FIXTURE).unwrap();
        assert_eq!(raw.next_page_token.as_deref(), Some("CAUQAA"));

        let videos: Vec<Video> = raw.into();
        assert_eq!(videos.len(), 1);

        let video = &videos[0];
        assert_eq!(video.id, "dQw4w9WgXcQ");
        assert_eq!(video.channel_title, "Rick Astley");
        assert_eq!(video.duration.as_deref(), Some("PT3M33S"));
        assert_eq!(video.view_count, Some(1_500_000_000));
        assert_eq!(video.like_count, Some(18_000_000));
        assert_eq!(video.comment_count, None);
        assert_eq!(video.category_id.as_deref(), Some("10"));
        assert_eq!(video.thumbnail_url.as_deref(), Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"));
        assert!(video.published_at.is_some());
    }

    #[test]
    fn test_normalize_search_list_skips_non_videos() {
        let raw: ListResponse<VideoItem> = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let videos: Vec<Video> = raw.into();

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, "abc123");
        assert_eq!(videos[0].title, "Rust in 100 seconds");
        assert!(videos[0].view_count.is_none());
        assert!(videos[0].duration.is_none());
    }

    #[test]
    fn test_empty_items() {
        let raw: ListResponse<VideoItem> = serde_json::from_str(r#"{"kind": "youtube#searchListResponse"}"#).unwrap();
        let videos: Vec<Video> = raw.into();
        assert!(videos.is_empty());
    }

    #[test]
    fn test_categories_filter_unassignable() {
        let json = r#"{
            "items": [
                { "id": "10", "snippet": { "title": "Music", "assignable": true } },
                { "id": "18", "snippet": { "title": "Short Movies", "assignable": false } },
                { "id": "20", "snippet": { "title": "Gaming" } }
            ]
        }"#;
        let raw: ListResponse<CategoryItem> = serde_json::from_str(json).unwrap();
        let categories: Vec<Category> = raw.into();

        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Music", "Gaming"]);
        assert_eq!(categories[0].id.as_deref(), Some("10"));
    }
}
