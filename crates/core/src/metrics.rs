//! Performance metrics report.
//!
//! The JSON shape is a fixed external contract: downstream consumers read
//! `testSuite`, `timestamp`, `version`, `results.{searchDebounce,apiRateLimit,liveChat}`
//! and `summary.{overallScore,totalTests,testDuration,recommendations}`.
//! Field names are camelCase and the file is pretty-printed with two spaces.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

pub const TEST_SUITE: &str = "MeTube Frontend Performance Tests";
pub const TEST_TOOL: &str = "mytube simulated performance harness";
pub const REPORT_VERSION: &str = "1.0.0";

const SEARCH_WEIGHT: f64 = 30.0;
const API_WEIGHT: f64 = 35.0;
const CHAT_WEIGHT: f64 = 35.0;

/// Chat deliveries under this average count as fully healthy.
pub const CHAT_DELIVERY_TARGET_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub test_suite: String,
    pub timestamp: String,
    pub version: String,
    pub environment: String,
    pub test_tool: String,
    pub results: TestResults,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub search_debounce: TestRun<SearchDebounceMetrics>,
    pub api_rate_limit: TestRun<ApiRateLimitMetrics>,
    pub live_chat: TestRun<LiveChatMetrics>,
}

/// One scripted test. Times are milliseconds since the harness started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRun<M> {
    pub test_name: String,
    pub description: String,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: u64,
    pub metrics: M,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDebounceMetrics {
    pub total_keystrokes: u32,
    pub api_calls_without_debounce: u32,
    pub api_calls_with_debounce: u32,
    pub debounce_efficiency: u32,
    pub average_response_time: u64,
    pub debounce_delay: u64,
    pub accuracy: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRateLimitMetrics {
    pub total_requests: u32,
    pub successful_requests: u32,
    pub failed_requests: u32,
    pub requests_before_limit: u32,
    pub success_rate: u32,
    pub average_response_time: u64,
    pub retry_attempts: u32,
    pub backoff_strategy: String,
    pub error_messages: Vec<String>,
    pub cache_efficiency: u32,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveChatMetrics {
    pub messages_processed: u32,
    pub average_delivery_time: u64,
    #[serde(rename = "averageUIUpdateTime")]
    pub average_ui_update_time: u64,
    pub messages_per_second: u32,
    pub concurrent_users: u32,
    pub concurrent_handling_time: u64,
    pub ui_update_latency: u64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_tests: u32,
    pub overall_score: u32,
    pub test_duration: u64,
    pub recommendations: Vec<String>,
}

impl SearchDebounceMetrics {
    pub fn status_for(efficiency: u32) -> &'static str {
        if efficiency > 80 { "Excellent" } else { "Good" }
    }
}

impl ApiRateLimitMetrics {
    pub fn status_for(success_rate: u32) -> &'static str {
        if success_rate > 80 { "Excellent" } else { "Needs Improvement" }
    }
}

impl LiveChatMetrics {
    pub fn status_for(average_delivery_ms: u64) -> &'static str {
        if average_delivery_ms < CHAT_DELIVERY_TARGET_MS { "Excellent" } else { "Good" }
    }
}

/// Integer percentage, rounded half away from zero. Zero when `whole` is zero.
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(whole) * 100.0).round() as u32
}

/// Weighted score: 30% search efficiency, 35% API success rate, 35% chat health.
pub fn overall_score(results: &TestResults) -> u32 {
    let search = f64::from(results.search_debounce.metrics.debounce_efficiency) / 100.0 * SEARCH_WEIGHT;
    let api = f64::from(results.api_rate_limit.metrics.success_rate) / 100.0 * API_WEIGHT;
    let chat_factor =
        if results.live_chat.metrics.average_delivery_time < CHAT_DELIVERY_TARGET_MS { 1.0 } else { 0.7 };

    (search + api + chat_factor * CHAT_WEIGHT).round() as u32
}

pub fn recommendations(results: &TestResults) -> Vec<String> {
    let mut out = Vec::new();

    if results.search_debounce.metrics.debounce_efficiency < 85 {
        out.push("Consider increasing debounce delay for better API efficiency".to_string());
    }
    if results.api_rate_limit.metrics.success_rate < 90 {
        out.push("Implement more aggressive caching to reduce API calls".to_string());
    }
    if results.live_chat.metrics.average_delivery_time > CHAT_DELIVERY_TARGET_MS {
        out.push("Optimize message processing for faster delivery".to_string());
    }

    if out.is_empty() {
        out.push("All performance metrics are within excellent ranges".to_string());
    }
    out
}

impl MetricsReport {
    /// Assemble a report, computing the summary from the results.
    pub fn new(results: TestResults, test_duration_ms: u64, timestamp: DateTime<Utc>) -> Self {
        let summary = ReportSummary {
            total_tests: 3,
            overall_score: overall_score(&results),
            test_duration: test_duration_ms,
            recommendations: recommendations(&results),
        };

        Self {
            test_suite: TEST_SUITE.to_string(),
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            version: REPORT_VERSION.to_string(),
            environment: "development".to_string(),
            test_tool: TEST_TOOL.to_string(),
            results,
            summary,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::ReportFailed(format!("failed to serialize report: {e}")))
    }

    /// `mytube-metrics-YYYY-MM-DD.json`
    pub fn file_name(date: NaiveDate) -> String {
        format!("mytube-metrics-{}.json", date.format("%Y-%m-%d"))
    }

    /// Write the report into `dir`, named after today's UTC date.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, Error> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::ReportFailed(format!("cannot create {}: {e}", dir.display())))?;

        let path = dir.join(Self::file_name(Utc::now().date_naive()));
        std::fs::write(&path, self.to_json_pretty()?)
            .map_err(|e| Error::ReportFailed(format!("cannot write {}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), score = self.summary.overall_score, "metrics report written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_results(efficiency: u32, success_rate: u32, delivery_ms: u64) -> TestResults {
        TestResults {
            search_debounce: TestRun {
                test_name: "Search Debouncing Performance".into(),
                description: "debounce".into(),
                start_time: 0.0,
                end_time: 2_500.0,
                duration: 2_500,
                metrics: SearchDebounceMetrics {
                    total_keystrokes: 14,
                    api_calls_without_debounce: 14,
                    api_calls_with_debounce: 1,
                    debounce_efficiency: efficiency,
                    average_response_time: 100,
                    debounce_delay: 200,
                    accuracy: "High - All queries processed correctly".into(),
                    status: SearchDebounceMetrics::status_for(efficiency).into(),
                },
            },
            api_rate_limit: TestRun {
                test_name: "API Rate Limit Handling".into(),
                description: "rate limit".into(),
                start_time: 2_500.0,
                end_time: 14_000.0,
                duration: 11_500,
                metrics: ApiRateLimitMetrics {
                    total_requests: 30,
                    successful_requests: 21,
                    failed_requests: 9,
                    requests_before_limit: 20,
                    success_rate,
                    average_response_time: 200,
                    retry_attempts: 3,
                    backoff_strategy: "Exponential backoff with 1s base delay".into(),
                    error_messages: vec!["Rate limit exceeded - 429 Too Many Requests".into()],
                    cache_efficiency: 50,
                    status: ApiRateLimitMetrics::status_for(success_rate).into(),
                },
            },
            live_chat: TestRun {
                test_name: "Live Chat Performance".into(),
                description: "chat".into(),
                start_time: 14_000.0,
                end_time: 16_000.0,
                duration: 2_000,
                metrics: LiveChatMetrics {
                    messages_processed: 25,
                    average_delivery_time: delivery_ms,
                    average_ui_update_time: 16,
                    messages_per_second: 16,
                    concurrent_users: 15,
                    concurrent_handling_time: 130,
                    ui_update_latency: 16,
                    status: LiveChatMetrics::status_for(delivery_ms).into(),
                },
            },
        }
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(13, 14), 93);
        assert_eq!(percent(21, 30), 70);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(3, 0), 0);
    }

    #[test]
    fn test_overall_score_weights() {
        // 93% * 30 + 70% * 35 + 1.0 * 35 = 27.9 + 24.5 + 35 = 87.4
        assert_eq!(overall_score(&sample_results(93, 70, 45)), 87);
        assert_eq!(overall_score(&sample_results(100, 100, 10)), 100);
        // slow chat only earns 70% of its weight: 30 + 35 + 24.5 = 89.5
        assert_eq!(overall_score(&sample_results(100, 100, 150)), 90);
        assert_eq!(overall_score(&sample_results(0, 0, 100)), 25);
    }

    #[test]
    fn test_recommendations() {
        let recs = recommendations(&sample_results(93, 70, 45));
        assert_eq!(recs, vec!["Implement more aggressive caching to reduce API calls".to_string()]);

        let recs = recommendations(&sample_results(50, 95, 150));
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("debounce delay"));
        assert!(recs[1].contains("faster delivery"));

        let recs = recommendations(&sample_results(95, 95, 20));
        assert_eq!(recs, vec!["All performance metrics are within excellent ranges".to_string()]);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(SearchDebounceMetrics::status_for(81), "Excellent");
        assert_eq!(SearchDebounceMetrics::status_for(80), "Good");
        assert_eq!(ApiRateLimitMetrics::status_for(70), "Needs Improvement");
        assert_eq!(LiveChatMetrics::status_for(99), "Excellent");
        assert_eq!(LiveChatMetrics::status_for(100), "Good");
    }

    #[test]
    fn test_report_has_required_keys() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        let report = MetricsReport::new(sample_results(93, 70, 45), 16_000, at);
        let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();

        for key in ["testSuite", "timestamp", "version", "results", "summary"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        for key in ["searchDebounce", "apiRateLimit", "liveChat"] {
            assert!(json["results"][key]["metrics"].is_object(), "missing results.{key}");
        }
        for key in ["overallScore", "totalTests", "testDuration", "recommendations"] {
            assert!(json["summary"].get(key).is_some(), "missing summary.{key}");
        }

        assert_eq!(json["timestamp"], "2026-10-16T09:30:00.000Z");
        assert_eq!(json["summary"]["totalTests"], 3);
        assert_eq!(json["summary"]["overallScore"], 87);
        assert_eq!(json["results"]["liveChat"]["metrics"]["averageUIUpdateTime"], 16);
        assert_eq!(json["results"]["searchDebounce"]["metrics"]["apiCallsWithDebounce"], 1);
    }

    #[test]
    fn test_pretty_json_uses_two_spaces() {
        let report = MetricsReport::new(sample_results(93, 70, 45), 1, Utc::now());
        let text = report.to_json_pretty().unwrap();
        assert!(text.starts_with("{\n  \"testSuite\""));
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(MetricsReport::file_name(date), "mytube-metrics-2026-10-16.json");
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let report = MetricsReport::new(sample_results(93, 70, 45), 1, Utc::now());

        let path = report.write_to_dir(dir.path().join("reports")).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("mytube-metrics-"));

        let written: MetricsReport = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, report);
    }
}
