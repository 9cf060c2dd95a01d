//! YouTube Data API request types and validation.

use serde::Serialize;

use super::YoutubeError;

const VIDEO_PARTS: &str = "snippet,contentDetails,statistics";

/// Longest query the client will send to `search.list`.
const MAX_QUERY_CHARS: usize = 400;

/// Query parameters for `videos.list`.
///
/// Either a chart listing (`chart=mostPopular`) or a lookup by `id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideosRequest {
    pub part: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,

    /// Comma-separated video ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_category_id: Option<String>,
}

impl VideosRequest {
    /// Most popular chart for a region, optionally narrowed to one category.
    pub fn popular(max_results: u8, region_code: &str, category_id: Option<&str>) -> Self {
        Self {
            part: VIDEO_PARTS.to_string(),
            chart: Some("mostPopular".to_string()),
            id: None,
            max_results: Some(max_results),
            region_code: Some(region_code.to_string()),
            video_category_id: category_id.map(str::to_string),
        }
    }

    /// Single video by id.
    pub fn by_id(video_id: &str) -> Self {
        Self {
            part: VIDEO_PARTS.to_string(),
            chart: None,
            id: Some(video_id.trim().to_string()),
            max_results: None,
            region_code: None,
            video_category_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), YoutubeError> {
        match (&self.chart, &self.id) {
            (None, None) => return Err(YoutubeError::InvalidRequest("either chart or id is required".into())),
            (Some(_), Some(_)) => return Err(YoutubeError::InvalidRequest("chart and id are exclusive".into())),
            (None, Some(id)) if id.is_empty() => {
                return Err(YoutubeError::InvalidRequest("video id cannot be empty".into()));
            }
            _ => {}
        }

        validate_max_results(self.max_results)
    }
}

/// Query parameters for `search.list`, restricted to videos.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub part: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u8>,
}

impl SearchRequest {
    pub fn new(query: &str, max_results: u8) -> Self {
        Self {
            part: "snippet".to_string(),
            kind: "video".to_string(),
            q: query.trim().to_string(),
            max_results: Some(max_results),
        }
    }

    pub fn validate(&self) -> Result<(), YoutubeError> {
        if self.q.is_empty() {
            return Err(YoutubeError::InvalidRequest("query cannot be empty".into()));
        }

        let chars = self.q.chars().count();
        if chars > MAX_QUERY_CHARS {
            return Err(YoutubeError::InvalidRequest(format!(
                "query too long: {chars} chars (max {MAX_QUERY_CHARS})"
            )));
        }

        validate_max_results(self.max_results)
    }
}

/// Query parameters for `videoCategories.list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesRequest {
    pub part: String,
    pub region_code: String,
}

impl CategoriesRequest {
    pub fn new(region_code: &str) -> Self {
        Self { part: "snippet".to_string(), region_code: region_code.to_string() }
    }
}

fn validate_max_results(max_results: Option<u8>) -> Result<(), YoutubeError> {
    if let Some(n) = max_results
        && !(1..=50).contains(&n)
    {
        return Err(YoutubeError::InvalidRequest(format!("maxResults must be 1-50, got {n}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_string<T: Serialize>(req: &T) -> String {
        let value = serde_json::to_value(req).unwrap();
        let mut url = url::Url::parse("https://example.test/").unwrap();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in value.as_object().unwrap() {
                let v = match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                pairs.append_pair(k, &v);
            }
        }
        url.query().unwrap_or_default().to_string()
    }

    #[test]
    fn test_popular_request_params() {
        let req = VideosRequest::popular(50, "IN", Some("10"));
        assert!(req.validate().is_ok());

        let qs = query_string(&req);
        assert!(qs.contains("chart=mostPopular"));
        assert!(qs.contains("maxResults=50"));
        assert!(qs.contains("regionCode=IN"));
        assert!(qs.contains("videoCategoryId=10"));
        assert!(!qs.contains("id="));
    }

    #[test]
    fn test_popular_without_category() {
        let qs = query_string(&VideosRequest::popular(10, "US", None));
        assert!(!qs.contains("videoCategoryId"));
    }

    #[test]
    fn test_by_id_request() {
        let req = VideosRequest::by_id(" dQw4w9WgXcQ ");
        assert!(req.validate().is_ok());
        assert_eq!(req.id.as_deref(), Some("dQw4w9WgXcQ"));
        assert!(req.chart.is_none());

        assert!(VideosRequest::by_id("  ").validate().is_err());
    }

    #[test]
    fn test_max_results_range() {
        assert!(VideosRequest::popular(0, "IN", None).validate().is_err());
        assert!(VideosRequest::popular(51, "IN", None).validate().is_err());
        assert!(SearchRequest::new("cats", 1).validate().is_ok());
    }

    #[test]
    fn test_search_request() {
        let req = SearchRequest::new("  lofi beats ", 25);
        assert!(req.validate().is_ok());
        assert_eq!(req.q, "lofi beats");

        let qs = query_string(&req);
        assert!(qs.contains("type=video"));
        assert!(qs.contains("part=snippet"));
    }

    #[test]
    fn test_search_request_rejects_empty_and_long() {
        assert!(matches!(SearchRequest::new("   ", 10).validate(), Err(YoutubeError::InvalidRequest(_))));
        assert!(SearchRequest::new(&"a".repeat(401), 10).validate().is_err());
    }
}
