//! YouTube Data API v3 client.
//!
//! Provides a client for the video endpoints the app needs, with request
//! validation and response normalization into [`mytube_core::Video`].
//!
//! ### Endpoints
//!
//! - `GET /videos`: most popular chart (optionally per category) or lookup by id
//! - `GET /search`: keyword search restricted to `type=video`
//! - `GET /videoCategories`: categories available in a region
//!
//! ### Behavior
//!
//! - **Authentication**: the API key travels as the `key` query parameter.
//! - **Errors**: 401 maps to an auth error. 403 is a quota error when the body
//!   names `quotaExceeded`, otherwise an auth error. 429 is rate limited.
//! - **No retries**: failures surface to the caller once.

pub mod error;
pub mod request;
pub mod response;

pub use error::YoutubeError;
pub use request::{CategoriesRequest, SearchRequest, VideosRequest};
pub use response::ListResponse;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use mytube_core::{AppConfig, Category, Video};
use reqwest::header;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Default base URL for the YouTube Data API.
const DEFAULT_BASE_URL: &str = "https://youtube.googleapis.com/youtube/v3";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "mytube/0.1";

/// YouTube client configuration.
#[derive(Debug, Clone)]
pub struct YoutubeConfig {
    pub api_key: String,
    pub base_url: String,
    pub region_code: String,
    /// Results per listing (1-50).
    pub max_results: u8,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            region_code: "IN".to_string(),
            max_results: 50,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl YoutubeConfig {
    /// Build from application config. Fails if no API key is configured.
    pub fn from_app(config: &AppConfig) -> Result<Self, YoutubeError> {
        let api_key = config.require_youtube_api_key().map_err(|_| YoutubeError::MissingApiKey)?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: config.youtube_base_url.trim_end_matches('/').to_string(),
            region_code: config.region_code.clone(),
            max_results: config.max_results,
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Anything that can list, search and describe videos.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Most popular videos, optionally restricted to one category id.
    async fn popular(&self, category_id: Option<&str>) -> Result<Vec<Video>, YoutubeError>;

    async fn search(&self, query: &str) -> Result<Vec<Video>, YoutubeError>;

    /// One video by id; `None` when the API knows no such video.
    async fn details(&self, video_id: &str) -> Result<Option<Video>, YoutubeError>;

    async fn categories(&self) -> Result<Vec<Category>, YoutubeError>;
}

/// YouTube Data API client.
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    config: YoutubeConfig,
}

impl YoutubeClient {
    pub fn new(config: YoutubeConfig) -> Result<Self, YoutubeError> {
        if config.api_key.trim().is_empty() {
            return Err(YoutubeError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| YoutubeError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    pub fn from_app(config: &AppConfig) -> Result<Self, YoutubeError> {
        Self::new(YoutubeConfig::from_app(config)?)
    }

    pub fn config(&self) -> &YoutubeConfig {
        &self.config
    }

    async fn get<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T, YoutubeError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let start = Instant::now();
        let url = format!("{}/{endpoint}", self.config.base_url);

        let http_response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(query)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!(endpoint, %status, "YouTube API response");

        if status.is_client_error() || status.is_server_error() {
            let body = http_response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), &body));
        }

        let bytes = http_response.bytes().await?;
        let parsed = serde_json::from_slice(&bytes).map_err(|e| YoutubeError::Parse(e.to_string()))?;

        tracing::debug!(endpoint, elapsed = ?start.elapsed(), "YouTube API request completed");
        Ok(parsed)
    }
}

/// Map an error status (and its body) onto a [`YoutubeError`].
fn classify_status(status: u16, body: &str) -> YoutubeError {
    match status {
        401 => YoutubeError::AuthError,
        403 if body.contains("quotaExceeded") || body.contains("dailyLimitExceeded") => YoutubeError::QuotaExceeded,
        403 => YoutubeError::AuthError,
        429 => YoutubeError::RateLimited,
        _ => YoutubeError::HttpError { status },
    }
}

#[async_trait]
impl VideoSource for YoutubeClient {
    async fn popular(&self, category_id: Option<&str>) -> Result<Vec<Video>, YoutubeError> {
        let req = VideosRequest::popular(self.config.max_results, &self.config.region_code, category_id);
        req.validate()?;

        tracing::debug!(?category_id, "fetching popular videos");
        let raw: ListResponse<response::VideoItem> = self.get("videos", &req).await?;
        Ok(raw.into())
    }

    async fn search(&self, query: &str) -> Result<Vec<Video>, YoutubeError> {
        let req = SearchRequest::new(query, self.config.max_results);
        req.validate()?;

        tracing::debug!(query = %req.q, "searching videos");
        let raw: ListResponse<response::VideoItem> = self.get("search", &req).await?;
        Ok(raw.into())
    }

    async fn details(&self, video_id: &str) -> Result<Option<Video>, YoutubeError> {
        let req = VideosRequest::by_id(video_id);
        req.validate()?;

        let raw: ListResponse<response::VideoItem> = self.get("videos", &req).await?;
        let videos: Vec<Video> = raw.into();
        Ok(videos.into_iter().next())
    }

    async fn categories(&self) -> Result<Vec<Category>, YoutubeError> {
        let req = CategoriesRequest::new(&self.config.region_code);
        let raw: ListResponse<response::CategoryItem> = self.get("videoCategories", &req).await?;
        Ok(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_app_missing_key() {
        let result = YoutubeConfig::from_app(&AppConfig::default());
        assert!(matches!(result, Err(YoutubeError::MissingApiKey)));
    }

    #[test]
    fn test_config_from_app() {
        let app = AppConfig {
            youtube_api_key: Some("k".into()),
            youtube_base_url: "http://localhost:9000/v3/".into(),
            region_code: "US".into(),
            max_results: 12,
            ..Default::default()
        };

        let config = YoutubeConfig::from_app(&app).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, "http://localhost:9000/v3");
        assert_eq!(config.region_code, "US");
        assert_eq!(config.max_results, 12);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_client_new_missing_key() {
        let result = YoutubeClient::new(YoutubeConfig::default());
        assert!(matches!(result, Err(YoutubeError::MissingApiKey)));
    }

    #[test]
    fn test_client_new() {
        let client = YoutubeClient::new(YoutubeConfig { api_key: "k".into(), ..Default::default() }).unwrap();
        assert_eq!(client.config().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(classify_status(401, ""), YoutubeError::AuthError));
        assert!(matches!(
            classify_status(403, r#"{"error":{"errors":[{"reason":"quotaExceeded"}]}}"#),
            YoutubeError::QuotaExceeded
        ));
        assert!(matches!(classify_status(403, r#"{"error":{"code":403}}"#), YoutubeError::AuthError));
        assert!(matches!(classify_status(429, ""), YoutubeError::RateLimited));
        assert!(matches!(classify_status(500, ""), YoutubeError::HttpError { status: 500 }));
    }
}
