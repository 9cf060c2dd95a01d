//! API rate-limit scenario: a burst of simulated requests past a fixed limit,
//! bounded retries with exponential backoff, and a suggestion-cache sub-run.

use std::sync::Arc;
use std::time::Duration;

use mytube_core::SharedSuggestionCache;
use mytube_core::metrics::{ApiRateLimitMetrics, TestRun, percent};
use rand::rngs::StdRng;
use tokio::time::Instant;

use super::{Clock, SimulatedSource, average_ms, jitter};
use crate::suggest::SuggestionFetcher;

const TOTAL_REQUESTS: u32 = 30;
const REQUEST_LIMIT: u32 = 20;
const MAX_RETRIES: u32 = 3;
const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded - 429 Too Many Requests";
const CACHE_QUERIES: &[&str] = &["react", "javascript", "react", "python", "javascript", "react"];

pub(super) async fn run(clock: &Clock, rng: &mut StdRng, backoff_base: Duration) -> TestRun<ApiRateLimitMetrics> {
    let start_time = clock.now_ms();

    let mut successful = 0u32;
    let mut failed = 0u32;
    let mut retries = 0u32;
    let mut response_times = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for index in 0..TOTAL_REQUESTS {
        let start = Instant::now();

        // Index 20 is the last request the simulated server accepts.
        if index > REQUEST_LIMIT {
            failed += 1;
            if !errors.iter().any(|e| e == RATE_LIMIT_MESSAGE) {
                errors.push(RATE_LIMIT_MESSAGE.to_string());
            }

            if retries < MAX_RETRIES {
                let backoff = backoff_base * 2u32.pow(retries);
                retries += 1;
                tracing::debug!(request = index + 1, attempt = retries, ?backoff, "simulated retry");
                tokio::time::sleep(backoff).await;
            }
            continue;
        }

        tokio::time::sleep(jitter(rng, 100..=300)).await;
        response_times.push(start.elapsed());
        successful += 1;
    }

    let cache_efficiency = cache_run(rng).await;
    let success_rate = percent(successful, TOTAL_REQUESTS);
    let end_time = clock.now_ms();

    TestRun {
        test_name: "API Rate Limit Handling".to_string(),
        description: "Tests API rate limiting behavior, retry logic, and error handling".to_string(),
        start_time,
        end_time,
        duration: (end_time - start_time).round() as u64,
        metrics: ApiRateLimitMetrics {
            total_requests: TOTAL_REQUESTS,
            successful_requests: successful,
            failed_requests: failed,
            requests_before_limit: REQUEST_LIMIT,
            success_rate,
            average_response_time: average_ms(&response_times),
            retry_attempts: retries,
            backoff_strategy: format!("Exponential backoff with {}s base delay", backoff_base.as_secs_f64()),
            error_messages: errors,
            cache_efficiency,
            status: ApiRateLimitMetrics::status_for(success_rate).to_string(),
        },
    }
}

/// Repeat queries through a real fetcher; returns the cache hit rate.
async fn cache_run(rng: &mut StdRng) -> u32 {
    let source = Arc::new(SimulatedSource::new(rng, 100..=300));
    let fetcher = SuggestionFetcher::new(source, Arc::new(SharedSuggestionCache::new()));

    for query in CACHE_QUERIES {
        if let Err(e) = fetcher.lookup(query).await {
            tracing::warn!(query, error = %e, "simulated cache lookup failed");
        }
    }

    let stats = fetcher.stats();
    tracing::debug!(hits = stats.hits, misses = stats.misses, "cache sub-run finished");
    stats.hit_rate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[tokio::test(start_paused = true)]
    async fn test_backoff_doubles() {
        let mut rng = StdRng::seed_from_u64(11);
        let run = run(&Clock::start(), &mut rng, Duration::from_millis(100)).await;

        assert_eq!(run.metrics.retry_attempts, 3);
        assert_eq!(run.metrics.backoff_strategy, "Exponential backoff with 0.1s base delay");
        // 21 requests of at least 100ms plus 100 + 200 + 400ms of backoff
        assert!(run.duration >= 2_100 + 700);
        assert!((100..=300).contains(&run.metrics.average_response_time));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_run_hit_rate() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(cache_run(&mut rng).await, 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_backoff_label() {
        let mut rng = StdRng::seed_from_u64(1);
        let run = run(&Clock::start(), &mut rng, Duration::from_secs(1)).await;
        assert_eq!(run.metrics.backoff_strategy, "Exponential backoff with 1s base delay");
    }
}
