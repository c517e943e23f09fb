//! Background connectivity monitor.

use super::QuoteClient;
use crate::state::Action;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Probes the provider periodically and reports reachability changes.
pub struct ConnectivityMonitor {
    client: Arc<QuoteClient>,
    interval: Duration,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl ConnectivityMonitor {
    pub fn new(
        client: Arc<QuoteClient>,
        interval: Duration,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            client,
            interval,
            action_tx,
        }
    }

    /// Start probing. Only changes are sent, starting from "connected".
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut connected = true;

            loop {
                ticker.tick().await;
                let reachable = self.client.probe().await;
                if reachable == connected {
                    continue;
                }
                connected = reachable;
                tracing::info!(connected, "Connectivity changed");
                if self.action_tx.send(Action::SetConnected(connected)).is_err() {
                    break;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::QuoteClientBuilder;
    use crate::api::transport::MockTransport;

    #[tokio::test(start_paused = true)]
    async fn test_reports_only_changes() {
        let mut mock = MockTransport::new();
        let mut probes = 0;
        mock.expect_probe().returning(move || {
            probes += 1;
            // up, down, down, up, up...
            !matches!(probes, 2 | 3)
        });
        let client = Arc::new(
            QuoteClientBuilder::new()
                .transport(Arc::new(mock))
                .build()
                .unwrap(),
        );

        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = ConnectivityMonitor::new(client, Duration::from_secs(1), tx).start();

        assert!(matches!(rx.recv().await, Some(Action::SetConnected(false))));
        assert!(matches!(rx.recv().await, Some(Action::SetConnected(true))));
        handle.abort();
    }
}
