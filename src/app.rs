//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, network fetches, and rendering.

use crate::api::{ConnectivityMonitor, QuoteClient, SearchScheduler};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::EventHandler;
use crate::state::{Action, Store};
use crate::storage::{WatchlistStore, WatchlistSync};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action sender handed to background tasks.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// API client.
    client: Arc<QuoteClient>,
    /// Writes watchlists after changes.
    watchlist_sync: WatchlistSync,
    /// Debounced symbol search.
    search: SearchScheduler,
    /// Connectivity monitor task.
    monitor_task: Option<JoinHandle<()>>,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        let client = Arc::new(QuoteClient::new(config.api.clone(), config.cache.clone())?);
        let watchlist_store = WatchlistStore::new(config.storage.watchlist_path()?);

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if config.ui.mouse_support {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let store = Store::new(action_tx.clone(), &config.ui);
        let watchlist_sync = WatchlistSync::new(watchlist_store, store.watchlists.revision);
        let search = SearchScheduler::new(
            Arc::clone(&client),
            config.ui.search_debounce(),
            action_tx.clone(),
        );
        let event_handler = EventHandler::new(
            config.keybindings.clone(),
            Duration::from_millis(config.ui.tick_rate_ms),
        );

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_tx,
            action_rx,
            client,
            watchlist_sync,
            search,
            monitor_task: None,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        let lists = self.watchlist_sync.store().load_or_default();
        self.store.reduce(Action::WatchlistsLoaded(lists));

        self.monitor_task = Some(
            ConnectivityMonitor::new(
                Arc::clone(&self.client),
                Duration::from_secs(self.config.api.connectivity_check_secs.max(1)),
                self.action_tx.clone(),
            )
            .start(),
        );

        self.store.dispatch(Action::LoadTopMovers)?;

        // Main event loop
        loop {
            self.event_handler.update_store_snapshot(&self.store);
            self.draw()?;

            tokio::select! {
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action).await?;
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await?;
                }
            }

            self.expire_notification();

            if self.store.app.should_quit {
                break;
            }
        }

        self.shutdown();
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let store = &self.store;
        let config = &self.config;
        self.terminal.draw(|frame| Ui::render(frame, store, config))?;
        Ok(())
    }

    /// Handle an action and every follow-up it produces.
    async fn handle_action(&mut self, action: Action) -> Result<()> {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            next = match action {
                fetch if fetch.is_fetch() => {
                    self.run_fetch(fetch).await?;
                    None
                }
                Action::ScheduleSearch(query) => {
                    self.search.schedule(query, self.store.app.connected);
                    None
                }
                Action::CancelSearch => {
                    self.search.cancel();
                    None
                }
                Action::Refresh => {
                    // An explicit refresh bypasses cached responses
                    self.client.clear_cache().await;
                    self.store.reduce(Action::Refresh)
                }
                other => self.store.reduce(other),
            };
        }

        self.persist_watchlists();
        Ok(())
    }

    /// Run a fetch inline, reducing its start, result, and any failure.
    async fn run_fetch(&mut self, fetch: Action) -> Result<()> {
        self.store.reduce(fetch.clone());
        // Show the loading state before blocking on the network.
        self.draw()?;

        let outcome = if self.store.app.connected {
            self.fetch(&fetch).await
        } else {
            Err(Error::Offline)
        };

        match outcome {
            Ok(loaded) => {
                self.store.reduce(loaded);
            }
            Err(e) => {
                if e.is_recoverable() {
                    tracing::warn!(error = %e, action = ?fetch, "Fetch failed");
                } else {
                    tracing::error!(error = %e, action = ?fetch, "Fetch failed");
                }
                self.store.reduce(failed(&fetch, e.user_message().to_string()));
                self.store.record_failure(fetch);
            }
        }
        Ok(())
    }

    /// Perform the network call behind a fetch action.
    async fn fetch(&self, fetch: &Action) -> Result<Action> {
        match fetch {
            Action::LoadTopMovers => {
                let movers = self.client.fetch_top_movers().await?;
                Ok(Action::TopMoversLoaded(movers))
            }
            Action::LoadViewAll(kind) => {
                let movers = self.client.fetch_top_movers().await?;
                Ok(Action::ViewAllLoaded(movers.into_side(*kind)))
            }
            Action::LoadDetails { symbol, range } => {
                let (details, chart) = self.client.fetch_details(symbol, *range).await?;
                Ok(Action::DetailsLoaded { details, chart })
            }
            Action::LoadChart { symbol, range } => {
                let chart = self.client.fetch_time_series(symbol, *range).await?;
                Ok(Action::ChartLoaded(chart))
            }
            other => Err(Error::application(format!("not a fetch: {other:?}"))),
        }
    }

    /// Write watchlists to disk if they changed since the last save.
    fn persist_watchlists(&mut self) {
        match self.watchlist_sync.sync(&self.store.watchlists) {
            Ok(true) => tracing::info!(
                revision = self.store.watchlists.revision,
                path = %self.watchlist_sync.store().path().display(),
                "Watchlists saved"
            ),
            Ok(false) => {}
            Err(e) => {
                tracing::error!(error = %e, "Failed to save watchlists");
                self.store
                    .reduce(Action::SetError(format!("Could not save watchlists: {e}")));
            }
        }
    }

    fn expire_notification(&mut self) {
        if self
            .store
            .app
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired())
        {
            self.store.reduce(Action::DismissNotification);
        }
    }

    fn shutdown(&mut self) {
        self.search.cancel();
        if let Some(task) = self.monitor_task.take() {
            task.abort();
        }
    }
}

/// The failure action matching a fetch.
fn failed(fetch: &Action, message: String) -> Action {
    match fetch {
        Action::LoadTopMovers => Action::TopMoversFailed(message),
        Action::LoadViewAll(_) => Action::ViewAllFailed(message),
        Action::LoadDetails { .. } => Action::DetailsFailed(message),
        Action::LoadChart { .. } => Action::ChartFailed(message),
        _ => Action::SetError(message),
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
