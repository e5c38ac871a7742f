//! Async task management for non-blocking search calls.
//!
//! Searches run in background tasks so the UI stays responsive. The
//! pattern: the event loop decides a search is due, spawns it through
//! [`TaskSpawner`], keeps rendering, and drains completed results from the
//! channel with `try_recv()`.
//!
//! Nothing here cancels an in-flight search. When a second search starts
//! before the first resolves, both complete and both replace the pending
//! chip set in arrival order, so a stale response can clobber a newer one.

use serde_json::Value;
use tokio::sync::mpsc;

use crate::api::{SearchClient, SearchParams};

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum SearchMessage {
    /// A search finished, successfully or not.
    SearchCompleted {
        /// The trimmed term the search was issued for.
        term: String,
        /// The fetched seed array, or a display-ready error.
        result: Result<Vec<Value>, String>,
    },
}

/// Spawns background search tasks.
///
/// Holds a channel sender; each spawn clones the client and sends its
/// result through the channel when done.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<SearchMessage>,
}

impl TaskSpawner {
    /// Create a new spawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<SearchMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task that fetches seeds for the given parameters.
    pub fn spawn_search(&self, client: &SearchClient, params: SearchParams) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let term = params.term().to_string();
            let result = client.search(&params).await.map_err(|e| e.to_string());
            let _ = tx.send(SearchMessage::SearchCompleted { term, result });
        });
    }
}

/// Create a new task channel and spawner.
///
/// The receiver is polled in the main event loop; the spawner is used to
/// start searches.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<SearchMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}
