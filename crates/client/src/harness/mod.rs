//! Simulated performance harness.
//!
//! Runs three scripted scenarios against the real debouncer, fetcher and store,
//! backed by sources that sleep for random latencies. The numbers are simulated;
//! only the report shape is meaningful. All timing uses tokio's clock, so the
//! harness runs instantly under paused time.

mod chat;
mod rate_limit;
mod search;

use std::ops::RangeInclusive;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use mytube_core::MetricsReport;
use mytube_core::metrics::TestResults;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::Instant;

use crate::chat::chat_rng;
use crate::suggest::{SuggestError, SuggestionSource};

/// Harness knobs.
#[derive(Debug, Clone)]
pub struct HarnessOptions {
    /// Seed for every random latency; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Quiet window used by the debounced search run.
    pub debounce_delay: Duration,
    /// First retry delay in the rate-limit run; doubles per retry.
    pub backoff_base: Duration,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self { seed: None, debounce_delay: Duration::from_millis(200), backoff_base: Duration::from_secs(1) }
    }
}

/// Run all three scenarios and assemble the report.
pub async fn run(options: &HarnessOptions) -> MetricsReport {
    let clock = Clock::start();
    let mut rng = chat_rng(options.seed);

    tracing::info!(seed = ?options.seed, "metrics harness started");

    let search_debounce = search::run(&clock, &mut rng, options.debounce_delay).await;
    let api_rate_limit = rate_limit::run(&clock, &mut rng, options.backoff_base).await;
    let live_chat = chat::run(&clock, &mut rng).await;

    let results = TestResults { search_debounce, api_rate_limit, live_chat };
    let report = MetricsReport::new(results, clock.elapsed_ms(), Utc::now());

    tracing::info!(
        score = report.summary.overall_score,
        duration_ms = report.summary.test_duration,
        "metrics harness finished"
    );
    report
}

/// Millisecond timestamps relative to harness start.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Clock {
    origin: Instant,
}

impl Clock {
    pub(crate) fn start() -> Self {
        Self { origin: Instant::now() }
    }

    pub(crate) fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000.0
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Average of durations in whole milliseconds, rounded.
pub(crate) fn average_ms(samples: &[Duration]) -> u64 {
    if samples.is_empty() {
        return 0;
    }
    let total: f64 = samples.iter().map(|d| d.as_secs_f64() * 1_000.0).sum();
    (total / samples.len() as f64).round() as u64
}

/// Random latency in the inclusive millisecond range.
pub(crate) fn jitter<R: Rng + ?Sized>(rng: &mut R, range_ms: RangeInclusive<u64>) -> Duration {
    Duration::from_millis(rng.gen_range(range_ms))
}

/// Suggestion source that sleeps a random latency and records every call.
pub(crate) struct SimulatedSource {
    rng: Mutex<StdRng>,
    latency_ms: RangeInclusive<u64>,
    response_times: Mutex<Vec<Duration>>,
}

impl SimulatedSource {
    pub(crate) fn new<R: Rng + ?Sized>(rng: &mut R, latency_ms: RangeInclusive<u64>) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(rng.r#gen())),
            latency_ms,
            response_times: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn response_times(&self) -> Vec<Duration> {
        self.response_times.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub(crate) fn calls(&self) -> usize {
        self.response_times.lock().map(|t| t.len()).unwrap_or_default()
    }
}

#[async_trait]
impl SuggestionSource for SimulatedSource {
    async fn suggest(&self, query: &str) -> Result<Vec<String>, SuggestError> {
        let latency = {
            let mut rng = self.rng.lock().map_err(|_| SuggestError::Unavailable("rng poisoned".into()))?;
            jitter(&mut *rng, self.latency_ms.clone())
        };

        let start = Instant::now();
        tokio::time::sleep(latency).await;

        if let Ok(mut times) = self.response_times.lock() {
            times.push(start.elapsed());
        }
        Ok(vec![query.to_string(), format!("{query} tutorial"), format!("{query} for beginners")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn seeded() -> HarnessOptions {
        HarnessOptions { seed: Some(42), ..Default::default() }
    }

    #[test]
    fn test_average_ms() {
        assert_eq!(average_ms(&[]), 0);
        assert_eq!(average_ms(&[Duration::from_millis(100), Duration::from_millis(151)]), 126);
    }

    #[test]
    fn test_jitter_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let d = jitter(&mut rng, 50..=150);
            assert!((50..=150).contains(&(d.as_millis() as u64)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_shape_and_fixed_metrics() {
        let report = run(&seeded()).await;

        let search = &report.results.search_debounce.metrics;
        assert_eq!(search.total_keystrokes, 14);
        assert_eq!(search.api_calls_without_debounce, 14);
        assert_eq!(search.api_calls_with_debounce, 1);
        assert_eq!(search.debounce_efficiency, 93);
        assert_eq!(search.status, "Excellent");

        let api = &report.results.api_rate_limit.metrics;
        assert_eq!(api.total_requests, 30);
        assert_eq!(api.successful_requests, 21);
        assert_eq!(api.failed_requests, 9);
        assert_eq!(api.success_rate, 70);
        assert_eq!(api.retry_attempts, 3);
        assert_eq!(api.error_messages, ["Rate limit exceeded - 429 Too Many Requests"]);
        assert_eq!(api.cache_efficiency, 50);
        assert_eq!(api.status, "Needs Improvement");

        let chat = &report.results.live_chat.metrics;
        assert_eq!(chat.messages_processed, 25);
        assert_eq!(chat.concurrent_users, 15);
        assert!(chat.messages_per_second >= 8);
        assert!((20..=70).contains(&chat.average_delivery_time));
        assert_eq!(chat.status, "Excellent");

        // 93% * 30 + 70% * 35 + 35 = 87.4
        assert_eq!(report.summary.overall_score, 87);
        assert_eq!(report.summary.recommendations, ["Implement more aggressive caching to reduce API calls"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_are_sequential_in_time() {
        let report = run(&seeded()).await;
        let r = &report.results;

        assert!(r.search_debounce.start_time <= r.search_debounce.end_time);
        assert!(r.search_debounce.end_time <= r.api_rate_limit.start_time);
        assert!(r.api_rate_limit.end_time <= r.live_chat.start_time);
        assert!(report.summary.test_duration as f64 >= r.live_chat.end_time.floor());
        // three backoffs: 1s + 2s + 4s
        assert!(r.api_rate_limit.duration >= 7_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_json_keys() {
        let report = run(&seeded()).await;
        let json: Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();

        for key in ["testSuite", "timestamp", "version", "environment", "testTool", "results", "summary"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["results"]["apiRateLimit"]["testName"], "API Rate Limit Handling");
    }
}
