//! Debounced symbol search.

use super::QuoteClient;
use crate::state::Action;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Runs at most one pending search, started after a quiet period.
///
/// Scheduling a new query aborts the previous one, so a slow response for an
/// old query can never land after a newer one.
pub struct SearchScheduler {
    client: Arc<QuoteClient>,
    delay: Duration,
    action_tx: mpsc::UnboundedSender<Action>,
    task: Option<JoinHandle<()>>,
}

impl SearchScheduler {
    pub fn new(
        client: Arc<QuoteClient>,
        delay: Duration,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            client,
            delay,
            action_tx,
            task: None,
        }
    }

    /// Replace any pending search with one for `query`.
    pub fn schedule(&mut self, query: String, connected: bool) {
        self.cancel();

        let client = Arc::clone(&self.client);
        let tx = self.action_tx.clone();
        let delay = self.delay;

        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let action = if !connected {
                Action::SearchFailed(query)
            } else {
                match client.search_symbols(&query).await {
                    Ok(matches) => Action::SearchResults { query, matches },
                    Err(e) => {
                        tracing::warn!(error = %e, %query, "Search failed");
                        Action::SearchFailed(query)
                    }
                }
            };
            let _ = tx.send(action);
        }));
    }

    /// Abort the pending search, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for SearchScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
