//! Keystroke debouncer for search suggestions.
//!
//! Each keystroke resets a quiet-window timer. When the window elapses the
//! latest query is looked up through a [`SuggestionFetcher`] and the outcome is
//! published on a watch channel.
//!
//! Every keystroke also advances a generation counter. A network response that
//! arrives after a newer keystroke is still cached under its own query, but it
//! is never published, so a slow early response cannot replace newer suggestions.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::SuggestionFetcher;

/// Where the published suggestions came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    Cleared,
    Cache,
    Network,
    Failed,
}

/// Currently published suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub query: String,
    pub items: Vec<String>,
    pub origin: Origin,
}

struct Keystroke {
    generation: u64,
    query: String,
}

/// Handle to a running debounce task. Dropping it stops the task.
pub struct SuggestionDebouncer {
    keystrokes: mpsc::UnboundedSender<Keystroke>,
    published: watch::Receiver<Suggestions>,
    generation: Arc<AtomicU64>,
    delay: Duration,
    task: JoinHandle<()>,
}

impl std::fmt::Debug for SuggestionDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionDebouncer")
            .field("delay", &self.delay)
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl SuggestionDebouncer {
    /// Spawn the debounce loop on the current tokio runtime.
    pub fn spawn(fetcher: SuggestionFetcher, delay: Duration) -> Self {
        let (keystrokes, rx) = mpsc::unbounded_channel();
        let (publisher, published) = watch::channel(Suggestions::default());
        let generation = Arc::new(AtomicU64::new(0));

        let task = tokio::spawn(run(fetcher, delay, rx, Arc::new(publisher), Arc::clone(&generation)));

        Self { keystrokes, published, generation, delay, task }
    }

    /// Record one keystroke: the full text of the search box after the key.
    pub fn input(&self, query: impl Into<String>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if self.keystrokes.send(Keystroke { generation, query: query.into() }).is_err() {
            tracing::warn!("suggestion debouncer is no longer running");
        }
    }

    /// Receiver that observes every published change.
    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.published.clone()
    }

    /// Latest published suggestions.
    pub fn current(&self) -> Suggestions {
        self.published.borrow().clone()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for SuggestionDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    fetcher: SuggestionFetcher, delay: Duration, mut rx: mpsc::UnboundedReceiver<Keystroke>,
    publisher: Arc<watch::Sender<Suggestions>>, generation: Arc<AtomicU64>,
) {
    let timer = tokio::time::sleep(delay);
    tokio::pin!(timer);
    let mut pending: Option<Keystroke> = None;

    loop {
        tokio::select! {
            keystroke = rx.recv() => match keystroke {
                Some(keystroke) => {
                    timer.as_mut().reset(Instant::now() + delay);
                    pending = Some(keystroke);
                }
                None => break,
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(keystroke) = pending.take() {
                    fire(&fetcher, keystroke, &publisher, &generation);
                }
            }
        }
    }

    tracing::debug!("suggestion debouncer stopped");
}

/// Resolve a settled query: clear, answer from cache, or start a fetch.
fn fire(
    fetcher: &SuggestionFetcher, keystroke: Keystroke, publisher: &Arc<watch::Sender<Suggestions>>,
    generation: &Arc<AtomicU64>,
) {
    let Keystroke { generation: issued, query } = keystroke;

    if query.trim().is_empty() {
        publish(publisher, generation, issued, Suggestions { query, items: Vec::new(), origin: Origin::Cleared });
        return;
    }

    if let Some(items) = fetcher.cached(&query) {
        publish(publisher, generation, issued, Suggestions { query, items, origin: Origin::Cache });
        return;
    }

    // In-flight fetches are never cancelled; a newer keystroke only stops them from publishing.
    let fetcher = fetcher.clone();
    let publisher = Arc::clone(publisher);
    let generation = Arc::clone(generation);
    tokio::spawn(async move {
        let next = match fetcher.fetch_and_store(&query).await {
            Ok(items) => Suggestions { query, items, origin: Origin::Network },
            Err(_) => Suggestions { query, items: Vec::new(), origin: Origin::Failed },
        };
        publish(&publisher, &generation, issued, next);
    });
}

fn publish(publisher: &watch::Sender<Suggestions>, generation: &AtomicU64, issued: u64, next: Suggestions) {
    let current = generation.load(Ordering::SeqCst);
    if issued != current {
        tracing::debug!(query = %next.query, issued, current, "dropping stale suggestions");
        return;
    }
    publisher.send_replace(next);
}
