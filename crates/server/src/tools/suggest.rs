//! Search suggestion tools.
//!
//! `search_suggest` is a direct cache-or-fetch lookup. `search_input` feeds one
//! keystroke into the debouncer and reports whatever is published right now,
//! which lags the keystroke by at least the debounce window.

use mytube_client::{Lookup, Origin};
use mytube_core::Error;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::context::AppContext;

/// Parameters for the search_suggest tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchSuggestParams {
    /// Raw query; cached entries match exactly, including whitespace.
    pub query: String,
}

/// Parameters for the search_input tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchInputParams {
    /// Full contents of the search box after the keystroke.
    pub query: String,
}

/// Output of the search_suggest tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchSuggestOutput {
    pub query: String,
    pub suggestions: Vec<String>,
    /// "cache", "network" or "cleared".
    pub source: String,
}

/// Output of the search_input tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchInputOutput {
    /// Keystroke just recorded.
    pub typed: String,
    /// Query the published suggestions belong to.
    pub published_query: String,
    pub suggestions: Vec<String>,
    /// "cleared", "cache", "network" or "failed".
    pub origin: String,
    pub debounce_ms: u64,
}

fn origin_label(origin: Origin) -> &'static str {
    match origin {
        Origin::Cleared => "cleared",
        Origin::Cache => "cache",
        Origin::Network => "network",
        Origin::Failed => "failed",
    }
}

/// Implementation of the search_suggest tool.
pub async fn suggest_impl(ctx: &AppContext, params: SearchSuggestParams) -> Result<CallToolResult, McpError> {
    let lookup = ctx.suggestions.lookup(&params.query).await.map_err(Error::from)?;

    let source = match &lookup {
        Lookup::Cleared => "cleared",
        Lookup::Cached(_) => "cache",
        Lookup::Fetched(_) => "network",
    };

    json_result(&SearchSuggestOutput {
        query: params.query,
        source: source.to_string(),
        suggestions: lookup.into_items(),
    })
}

/// Implementation of the search_input tool.
pub async fn input_impl(ctx: &AppContext, params: SearchInputParams) -> Result<CallToolResult, McpError> {
    ctx.debouncer.input(params.query.clone());
    let current = ctx.debouncer.current();

    json_result(&SearchInputOutput {
        typed: params.query,
        published_query: current.query,
        suggestions: current.items,
        origin: origin_label(current.origin).to_string(),
        debounce_ms: ctx.debouncer.delay().as_millis() as u64,
    })
}
