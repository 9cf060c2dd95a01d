//! Metrics tools: run the simulated harness, optionally writing the report file.

use std::path::PathBuf;

use mytube_client::HarnessOptions;
use mytube_client::harness;
use mytube_core::metrics::ReportSummary;
use mytube_core::{Action, MetricsReport, Page};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::context::AppContext;

/// Parameters for the metrics_run tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MetricsRunParams {
    /// Seed for reproducible simulated latencies.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Parameters for the metrics_download tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MetricsDownloadParams {
    /// Target directory; defaults to the configured metrics directory.
    #[serde(default)]
    pub dir: Option<String>,

    /// Seed for reproducible simulated latencies.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Output of the metrics_download tool.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsDownloadOutput {
    pub path: String,
    pub summary: ReportSummary,
}

async fn run_harness(ctx: &AppContext, seed: Option<u64>) -> MetricsReport {
    let options = HarnessOptions { seed, debounce_delay: ctx.config.suggest_debounce(), ..Default::default() };
    let report = harness::run(&options).await;
    ctx.store.dispatch(Action::Navigate(Page::Metrics));
    report
}

/// Implementation of the metrics_run tool.
pub async fn run_impl(ctx: &AppContext, params: MetricsRunParams) -> Result<CallToolResult, McpError> {
    let report = run_harness(ctx, params.seed).await;
    json_result(&report)
}

/// Implementation of the metrics_download tool.
pub async fn download_impl(ctx: &AppContext, params: MetricsDownloadParams) -> Result<CallToolResult, McpError> {
    let dir = params.dir.map(PathBuf::from).unwrap_or_else(|| ctx.config.metrics_dir.clone());

    let report = run_harness(ctx, params.seed).await;
    let path = report.write_to_dir(&dir)?;

    json_result(&MetricsDownloadOutput { path: path.display().to_string(), summary: report.summary })
}
