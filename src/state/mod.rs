//! State management for FinStock.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. [`Store::reduce`]
//! applies an action and may hand back a follow-up action (usually a fetch)
//! for the app to run.

mod app_state;
mod details_state;
mod market_state;
mod search_state;
mod view_all_state;
mod watchlist_state;

pub use app_state::{AppState, InputMode, View};
pub use details_state::{ChartPoint, CompanyDetails, CompanyOverview, DetailsState, TimeRange};
pub use market_state::{MarketState, MoverKind, StockQuote, TopMovers};
pub use search_state::{SearchMatch, SearchState};
pub use view_all_state::ViewAllState;
pub use watchlist_state::{Watchlist, WatchlistStock, WatchlistState};

use crate::config::UiConfig;
use crate::error::Result;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SwitchTab(View),
    Back,
    SetInputMode(InputMode),

    // Home
    LoadTopMovers,
    TopMoversLoaded(TopMovers),
    TopMoversFailed(String),
    FocusNextSection,

    // View all
    OpenViewAll(MoverKind),
    LoadViewAll(MoverKind),
    ViewAllLoaded(Vec<StockQuote>),
    ViewAllFailed(String),
    LoadMore,

    // Details
    OpenDetails(String),
    LoadDetails { symbol: String, range: TimeRange },
    DetailsLoaded {
        details: CompanyDetails,
        chart: Vec<ChartPoint>,
    },
    DetailsFailed(String),
    SelectRange(TimeRange),
    NextRange,
    PrevRange,
    LoadChart { symbol: String, range: TimeRange },
    ChartLoaded(Vec<ChartPoint>),
    ChartFailed(String),

    // Search
    SearchInput(char),
    SearchBackspace,
    ScheduleSearch(String),
    CancelSearch,
    SearchResults {
        query: String,
        matches: Vec<SearchMatch>,
    },
    SearchFailed(String),

    // Watchlists
    WatchlistsLoaded(Vec<Watchlist>),
    CreateWatchlist(String),
    DeleteWatchlist(String),
    AddToWatchlist {
        watchlist: String,
        stock: WatchlistStock,
    },
    RemoveFromWatchlist { watchlist: String, symbol: String },
    OpenWatchlistPicker,
    BeginNewWatchlist,
    DeleteSelected,

    // Text input
    InputChar(char),
    InputBackspace,
    CursorLeft,
    CursorRight,
    SubmitInput,

    // UI actions
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Select,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,

    // Data refresh
    Refresh,
    Retry,

    // Error handling
    SetError(String),
    ClearError,

    // Connection status
    SetConnected(bool),

    // Quit
    Quit,
}

impl Action {
    /// Whether this action performs a network fetch.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            Action::LoadTopMovers
                | Action::LoadViewAll(_)
                | Action::LoadDetails { .. }
                | Action::LoadChart { .. }
        )
    }
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    pub created_at: Instant,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    fn with_level(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration_secs,
            created_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Error, 10)
    }

    /// Whether the notification has been shown long enough.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= Duration::from_secs(self.duration_secs)
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Home screen movers.
    pub markets: MarketState,
    /// View-all pagination.
    pub view_all: ViewAllState,
    /// Details screen.
    pub details: DetailsState,
    /// Symbol search.
    pub search: SearchState,
    /// Watchlists.
    pub watchlists: WatchlistState,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>, ui: &UiConfig) -> Self {
        Self {
            app: AppState::new(),
            markets: MarketState::new(ui.home_preview_count),
            view_all: ViewAllState::new(ui.page_size),
            details: DetailsState::default(),
            search: SearchState::new(ui.min_search_len),
            watchlists: WatchlistState::default(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state, returning any follow-up action.
    pub fn reduce(&mut self, action: Action) -> Option<Action> {
        match action {
            // Navigation
            Action::SwitchTab(view) => {
                self.app.switch_tab(view);
                self.details.reset();
                self.watchlists.close();
                None
            }
            Action::Back => self.back(),
            Action::SetInputMode(mode) => {
                let leaving_search =
                    self.app.input_mode == InputMode::Search && mode != InputMode::Search;
                self.app.input_mode = mode;
                if mode == InputMode::Picker {
                    self.app.picker_index = 0;
                }
                if leaving_search {
                    self.search.clear();
                    return Some(Action::CancelSearch);
                }
                None
            }

            // Home
            Action::LoadTopMovers => {
                self.markets.begin_load();
                self.app.loading = true;
                None
            }
            Action::TopMoversLoaded(movers) => {
                self.markets.set_movers(movers);
                self.fetch_succeeded();
                None
            }
            Action::TopMoversFailed(message) => {
                self.markets.fail(message);
                self.app.loading = false;
                None
            }
            Action::FocusNextSection => {
                self.markets.toggle_focus();
                None
            }

            // View all
            Action::OpenViewAll(kind) => {
                self.view_all.reset();
                self.view_all.kind = kind;
                self.app.navigate(View::ViewAll);
                Some(Action::LoadViewAll(kind))
            }
            Action::LoadViewAll(kind) => {
                self.view_all.begin_load(kind);
                self.app.loading = true;
                None
            }
            Action::ViewAllLoaded(rows) => {
                self.view_all.set_rows(rows);
                self.fetch_succeeded();
                None
            }
            Action::ViewAllFailed(message) => {
                self.view_all.fail(message);
                self.app.loading = false;
                None
            }
            Action::LoadMore => {
                self.view_all.load_more();
                None
            }

            // Details
            Action::OpenDetails(symbol) => {
                self.details.open(symbol.clone());
                self.app.navigate(View::Details);
                if self.details.has_company() {
                    None
                } else {
                    Some(Action::LoadDetails {
                        symbol,
                        range: self.details.selected_range,
                    })
                }
            }
            Action::LoadDetails { .. } => {
                self.details.begin_load();
                self.app.loading = true;
                None
            }
            Action::DetailsLoaded { details, chart } => {
                self.details.set_details(details, chart);
                self.fetch_succeeded();
                None
            }
            Action::DetailsFailed(message) => {
                self.details.fail(message);
                self.app.loading = false;
                None
            }
            Action::SelectRange(range) => self.select_range(range),
            Action::NextRange => self.select_range(self.details.selected_range.next()),
            Action::PrevRange => self.select_range(self.details.selected_range.prev()),
            Action::LoadChart { .. } => {
                self.details.begin_chart_load();
                None
            }
            Action::ChartLoaded(chart) => {
                self.details.set_chart(chart);
                self.fetch_succeeded();
                None
            }
            Action::ChartFailed(message) => {
                self.details.fail(message);
                None
            }

            // Search
            Action::SearchInput(c) => Some(Self::search_followup(self.search.push_char(c))),
            Action::SearchBackspace => Some(Self::search_followup(self.search.pop_char())),
            Action::ScheduleSearch(_) | Action::CancelSearch => None,
            Action::SearchResults { query, matches } => {
                self.search.apply_results(&query, matches);
                None
            }
            Action::SearchFailed(query) => {
                self.search.fail(&query);
                None
            }

            // Watchlists
            Action::WatchlistsLoaded(lists) => {
                self.watchlists.restore(lists);
                None
            }
            Action::CreateWatchlist(name) => {
                if self.watchlists.create(&name) {
                    self.notify(Notification::success(format!(
                        "Created watchlist \"{}\"",
                        name.trim()
                    )));
                } else {
                    self.notify(Notification::warning("Watchlist name is empty or already used"));
                }
                None
            }
            Action::DeleteWatchlist(name) => {
                if self.watchlists.delete(&name) {
                    if self.app.current_view == View::WatchlistDetail {
                        self.back();
                    }
                    self.notify(Notification::info(format!("Deleted watchlist \"{name}\"")));
                }
                None
            }
            Action::AddToWatchlist { watchlist, stock } => {
                let symbol = stock.symbol.clone();
                if self.watchlists.add(&watchlist, stock) {
                    self.notify(Notification::success(format!("Added {symbol} to {watchlist}")));
                }
                None
            }
            Action::RemoveFromWatchlist { watchlist, symbol } => {
                if self.watchlists.remove(&watchlist, &symbol) {
                    self.notify(Notification::info(format!("Removed {symbol} from {watchlist}")));
                }
                None
            }
            Action::OpenWatchlistPicker => {
                if self.current_stock().is_some() {
                    self.app.input_mode = InputMode::Picker;
                    self.app.picker_index = 0;
                }
                None
            }
            Action::BeginNewWatchlist => {
                self.app.return_mode = self.app.input_mode;
                self.app.input_mode = InputMode::Insert;
                self.app.clear_input();
                None
            }
            Action::DeleteSelected => self.delete_selected(),

            // Text input
            Action::InputChar(c) => {
                self.app.push_char(c);
                None
            }
            Action::InputBackspace => {
                self.app.pop_char();
                None
            }
            Action::CursorLeft => {
                self.app.cursor_left();
                None
            }
            Action::CursorRight => {
                self.app.cursor_right();
                None
            }
            Action::SubmitInput => {
                let name = std::mem::take(&mut self.app.input_buffer);
                self.app.clear_input();
                self.app.input_mode = std::mem::take(&mut self.app.return_mode);
                Some(Action::CreateWatchlist(name))
            }

            // UI actions
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::PageUp => self.scroll(-10),
            Action::PageDown => self.scroll(10),
            Action::Select => self.select(),
            Action::ToggleHelp => {
                self.app.show_help = !self.app.show_help;
                None
            }
            Action::ShowNotification(notification) => {
                self.notify(notification);
                None
            }
            Action::DismissNotification => {
                self.app.notification = None;
                None
            }

            // Data refresh
            Action::Refresh => self.current_view_fetch(),
            Action::Retry => self.app.last_failed.take().or_else(|| self.current_view_fetch()),

            // Error handling
            Action::SetError(error) => {
                self.app.error = Some(error);
                self.app.loading = false;
                None
            }
            Action::ClearError => {
                self.app.error = None;
                None
            }

            // Connection status
            Action::SetConnected(connected) => {
                let restored = connected && !self.app.connected;
                self.app.connected = connected;
                if restored {
                    self.notify(Notification::info("Back online"));
                    return self.app.last_failed.take();
                }
                if !connected {
                    self.notify(Notification::warning(
                        crate::Error::Offline.user_message(),
                    ));
                }
                None
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
                None
            }
        }
    }

    /// Remember a failed fetch so it can be replayed.
    pub fn record_failure(&mut self, fetch: Action) {
        self.app.last_failed = Some(fetch);
    }

    /// The stock the watchlist picker would act on.
    pub fn current_stock(&self) -> Option<WatchlistStock> {
        let symbol = self.details.symbol.clone()?;
        let company = self.details.company.as_ref();
        Some(WatchlistStock {
            name: company
                .and_then(|c| c.overview.name.clone())
                .unwrap_or_else(|| symbol.clone()),
            price: company.and_then(|c| c.price.clone()).unwrap_or_default(),
            change_percentage: company
                .and_then(|c| c.change_percent.clone())
                .unwrap_or_default(),
            symbol,
        })
    }

    fn fetch_succeeded(&mut self) {
        self.app.loading = false;
        self.app.last_failed = None;
    }

    fn notify(&mut self, notification: Notification) {
        self.app.notification = Some(notification);
    }

    fn search_followup(query: Option<String>) -> Action {
        match query {
            Some(query) => Action::ScheduleSearch(query),
            None => Action::CancelSearch,
        }
    }

    fn select_range(&mut self, range: TimeRange) -> Option<Action> {
        if !self.details.select_range(range) {
            return None;
        }
        let symbol = self.details.symbol.clone()?;
        if self.details.has_company() {
            Some(Action::LoadChart { symbol, range })
        } else {
            Some(Action::LoadDetails { symbol, range })
        }
    }

    /// The fetch that (re)loads whatever the current view shows.
    /// The failed-fetch message the current view is showing, if any.
    pub fn fetch_error(&self) -> Option<&str> {
        match self.app.current_view {
            View::Home => self.markets.error.as_deref(),
            View::ViewAll => self.view_all.error.as_deref(),
            View::Details => self.details.error.as_deref(),
            View::Watchlists | View::WatchlistDetail => None,
        }
    }

    fn current_view_fetch(&self) -> Option<Action> {
        match self.app.current_view {
            View::Home => Some(Action::LoadTopMovers),
            View::ViewAll => Some(Action::LoadViewAll(self.view_all.kind)),
            View::Details => self.details.symbol.clone().map(|symbol| Action::LoadDetails {
                symbol,
                range: self.details.selected_range,
            }),
            View::Watchlists | View::WatchlistDetail => None,
        }
    }

    fn back(&mut self) -> Option<Action> {
        match self.app.back()? {
            View::Details => self.details.reset(),
            View::WatchlistDetail => self.watchlists.close(),
            View::ViewAll => self.view_all.reset(),
            View::Home | View::Watchlists => {}
        }
        None
    }

    fn select(&mut self) -> Option<Action> {
        match self.app.input_mode {
            InputMode::Search => {
                let symbol = self.search.selected()?.symbol.clone();
                self.search.clear();
                self.app.input_mode = InputMode::Normal;
                return Some(Action::OpenDetails(symbol));
            }
            InputMode::Picker => {
                let watchlist = self.watchlists.lists.get(self.app.picker_index)?.name.clone();
                let stock = self.current_stock()?;
                let present = self
                    .watchlists
                    .get(&watchlist)
                    .is_some_and(|w| w.contains(&stock.symbol));
                return Some(if present {
                    Action::RemoveFromWatchlist {
                        watchlist,
                        symbol: stock.symbol,
                    }
                } else {
                    Action::AddToWatchlist { watchlist, stock }
                });
            }
            InputMode::Normal | InputMode::Insert => {}
        }

        match self.app.current_view {
            View::Home => self
                .markets
                .selected()
                .map(|q| Action::OpenDetails(q.symbol.clone())),
            View::ViewAll => self
                .view_all
                .selected()
                .map(|q| Action::OpenDetails(q.symbol.clone())),
            View::Watchlists => {
                if self.watchlists.open_selected() {
                    self.app.navigate(View::WatchlistDetail);
                }
                None
            }
            View::WatchlistDetail => self
                .watchlists
                .selected_stock()
                .map(|s| Action::OpenDetails(s.symbol.clone())),
            View::Details => None,
        }
    }

    fn delete_selected(&mut self) -> Option<Action> {
        match self.app.current_view {
            View::Watchlists => self
                .watchlists
                .selected()
                .map(|w| Action::DeleteWatchlist(w.name.clone())),
            View::WatchlistDetail => {
                let watchlist = self.watchlists.opened()?.name.clone();
                let symbol = self.watchlists.selected_stock()?.symbol.clone();
                Some(Action::RemoveFromWatchlist { watchlist, symbol })
            }
            _ => None,
        }
    }

    fn scroll(&mut self, delta: i32) -> Option<Action> {
        match self.app.input_mode {
            InputMode::Search => {
                self.search.scroll(delta);
                return None;
            }
            InputMode::Picker => {
                let max_index = self.watchlists.lists.len().saturating_sub(1) as i32;
                self.app.picker_index =
                    (self.app.picker_index as i32 + delta).clamp(0, max_index.max(0)) as usize;
                return None;
            }
            InputMode::Normal | InputMode::Insert => {}
        }

        match self.app.current_view {
            View::Home => self.markets.scroll(delta),
            View::ViewAll => self.view_all.scroll(delta),
            View::Watchlists | View::WatchlistDetail => self.watchlists.scroll(delta),
            View::Details => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx, &UiConfig::default())
    }

    fn quote(symbol: &str) -> StockQuote {
        StockQuote {
            id: format!("{symbol}0"),
            symbol: symbol.into(),
            name: symbol.into(),
            price: "100.00".into(),
            change_percentage: "1.5%".into(),
        }
    }

    fn company(symbol: &str) -> CompanyDetails {
        CompanyDetails {
            overview: CompanyOverview {
                symbol: symbol.into(),
                name: Some(format!("{symbol} Corp")),
                ..Default::default()
            },
            price: Some("101.00".into()),
            change_percent: Some("0.5%".into()),
        }
    }

    #[test]
    fn test_open_details_requests_fetch() {
        let mut store = store();
        let next = store.reduce(Action::OpenDetails("IBM".into()));
        assert!(matches!(
            next,
            Some(Action::LoadDetails { ref symbol, range: TimeRange::OneDay }) if symbol == "IBM"
        ));
        assert_eq!(store.app.current_view, View::Details);
    }

    #[test]
    fn test_range_change_only_refetches_chart() {
        let mut store = store();
        store.reduce(Action::OpenDetails("IBM".into()));
        store.reduce(Action::DetailsLoaded {
            details: company("IBM"),
            chart: Vec::new(),
        });

        let next = store.reduce(Action::NextRange);
        assert!(matches!(
            next,
            Some(Action::LoadChart { range: TimeRange::OneWeek, .. })
        ));
        // same range again is a no-op
        assert!(store.reduce(Action::SelectRange(TimeRange::OneWeek)).is_none());
    }

    #[test]
    fn test_empty_movers_error_surfaces() {
        let mut store = store();
        store.reduce(Action::LoadTopMovers);
        store.reduce(Action::TopMoversFailed(
            crate::Error::ApiLimitReached("empty".into()).user_message().into(),
        ));
        assert_eq!(
            store.markets.error.as_deref(),
            Some("API limit reached. Please try again later.")
        );
        assert!(store.markets.gainers.is_empty());
        assert!(!store.app.loading);
    }

    #[test]
    fn test_reconnect_replays_last_failure() {
        let mut store = store();
        store.reduce(Action::SetConnected(false));
        store.record_failure(Action::LoadTopMovers);

        let next = store.reduce(Action::SetConnected(true));
        assert!(matches!(next, Some(Action::LoadTopMovers)));
        assert!(store.app.last_failed.is_none());

        // already connected: nothing to replay
        store.record_failure(Action::LoadTopMovers);
        assert!(store.reduce(Action::SetConnected(true)).is_none());
    }

    #[test]
    fn test_retry_falls_back_to_current_view() {
        let mut store = store();
        store.reduce(Action::OpenViewAll(MoverKind::Losers));
        assert!(matches!(
            store.reduce(Action::Retry),
            Some(Action::LoadViewAll(MoverKind::Losers))
        ));
    }

    #[test]
    fn test_success_clears_last_failure() {
        let mut store = store();
        store.record_failure(Action::LoadTopMovers);
        store.reduce(Action::TopMoversLoaded(TopMovers {
            gainers: vec![quote("AAA")],
            losers: vec![quote("BBB")],
        }));
        assert!(store.app.last_failed.is_none());
    }

    #[test]
    fn test_select_on_home_opens_details() {
        let mut store = store();
        store.reduce(Action::TopMoversLoaded(TopMovers {
            gainers: vec![quote("AAA"), quote("AAB")],
            losers: vec![quote("ZZZ")],
        }));
        store.reduce(Action::ScrollDown);
        assert!(matches!(
            store.reduce(Action::Select),
            Some(Action::OpenDetails(ref s)) if s == "AAB"
        ));
        store.reduce(Action::FocusNextSection);
        assert!(matches!(
            store.reduce(Action::Select),
            Some(Action::OpenDetails(ref s)) if s == "ZZZ"
        ));
    }

    #[test]
    fn test_back_from_details_resets_slice() {
        let mut store = store();
        store.reduce(Action::OpenDetails("IBM".into()));
        store.reduce(Action::DetailsLoaded {
            details: company("IBM"),
            chart: Vec::new(),
        });
        store.reduce(Action::Back);
        assert_eq!(store.app.current_view, View::Home);
        assert!(store.details.company.is_none());
        assert!(store.details.symbol.is_none());
    }

    #[test]
    fn test_picker_toggles_membership() {
        let mut store = store();
        store.reduce(Action::CreateWatchlist("Tech".into()));
        store.reduce(Action::OpenDetails("IBM".into()));
        store.reduce(Action::DetailsLoaded {
            details: company("IBM"),
            chart: Vec::new(),
        });
        store.reduce(Action::OpenWatchlistPicker);
        assert_eq!(store.app.input_mode, InputMode::Picker);

        let add = store.reduce(Action::Select).unwrap();
        store.reduce(add);
        let tech = store.watchlists.get("Tech").unwrap();
        assert_eq!(tech.stocks.len(), 1);
        assert_eq!(tech.stocks[0].name, "IBM Corp");
        assert_eq!(tech.stocks[0].price, "101.00");

        let remove = store.reduce(Action::Select).unwrap();
        assert!(matches!(remove, Action::RemoveFromWatchlist { .. }));
        store.reduce(remove);
        assert!(!store.watchlists.contains_symbol("IBM"));
    }

    #[test]
    fn test_new_watchlist_via_input() {
        let mut store = store();
        store.reduce(Action::SwitchTab(View::Watchlists));
        store.reduce(Action::BeginNewWatchlist);
        assert_eq!(store.app.input_mode, InputMode::Insert);
        for c in "Energy".chars() {
            store.reduce(Action::InputChar(c));
        }
        let create = store.reduce(Action::SubmitInput).unwrap();
        assert_eq!(store.app.input_mode, InputMode::Normal);
        store.reduce(create);
        assert!(store.watchlists.get("Energy").is_some());
        assert_eq!(store.watchlists.revision, 1);
    }

    #[test]
    fn test_delete_selected_in_watchlist_detail() {
        let mut store = store();
        store.reduce(Action::CreateWatchlist("Tech".into()));
        store.reduce(Action::AddToWatchlist {
            watchlist: "Tech".into(),
            stock: WatchlistStock::from(&quote("MSFT")),
        });
        store.reduce(Action::SwitchTab(View::Watchlists));
        store.reduce(Action::Select);
        assert_eq!(store.app.current_view, View::WatchlistDetail);

        let remove = store.reduce(Action::DeleteSelected).unwrap();
        store.reduce(remove);
        assert!(store.watchlists.get("Tech").unwrap().stocks.is_empty());
    }

    #[test]
    fn test_search_followups() {
        let mut store = store();
        store.reduce(Action::SetInputMode(InputMode::Search));
        assert!(matches!(store.reduce(Action::SearchInput('A')), Some(Action::CancelSearch)));
        assert!(matches!(
            store.reduce(Action::SearchInput('P')),
            Some(Action::ScheduleSearch(ref q)) if q == "AP"
        ));
        store.reduce(Action::SearchResults {
            query: "AP".into(),
            matches: vec![SearchMatch {
                symbol: "APPL".into(),
                name: "Apple".into(),
                kind: "Equity".into(),
                region: "United States".into(),
                currency: "USD".into(),
                match_score: 0.8,
            }],
        });
        assert!(matches!(
            store.reduce(Action::Select),
            Some(Action::OpenDetails(ref s)) if s == "APPL"
        ));
        assert_eq!(store.app.input_mode, InputMode::Normal);
        assert!(store.search.query.is_empty());
    }

    #[test]
    fn test_leaving_search_cancels() {
        let mut store = store();
        store.reduce(Action::SetInputMode(InputMode::Search));
        store.reduce(Action::SearchInput('I'));
        store.reduce(Action::SearchInput('B'));

        let next = store.reduce(Action::SetInputMode(InputMode::Normal));
        assert!(matches!(next, Some(Action::CancelSearch)));
        assert!(store.search.query.is_empty());
        assert!(!store.search.show_dropdown());
    }
}
