//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{
    DetailsView, HelpPanel, MoversPanel, SearchBar, StatusBar, TabBar, ViewAllList,
    WatchlistDetailView, WatchlistPicker, WatchlistsView,
};

use crate::config::Config;
use crate::state::{InputMode, Store, View};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store, config: &Config) {
        let layout = Layout::new(frame.area(), config.ui.show_status_bar);

        StatusBar::render(frame, layout.status_area, store);
        TabBar::render(frame, layout.tab_area, store);
        SearchBar::render(frame, layout.search_area, store);

        match store.app.current_view {
            View::Home => MoversPanel::render(frame, layout.main_area, store),
            View::ViewAll => ViewAllList::render(frame, layout.main_area, store),
            View::Details => DetailsView::render(frame, layout.main_area, store),
            View::Watchlists => WatchlistsView::render(frame, layout.main_area, store),
            View::WatchlistDetail => WatchlistDetailView::render(frame, layout.main_area, store),
        }

        // Overlays, last drawn on top
        SearchBar::render_dropdown(frame, layout.search_area, frame.area(), store);

        match store.app.input_mode {
            InputMode::Picker => WatchlistPicker::render(frame, layout.main_area, store),
            InputMode::Insert => widgets::render_input_popup(frame, layout.main_area, store),
            InputMode::Normal | InputMode::Search => {}
        }

        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), &config.keybindings);
        }

        if let Some(error) = &store.app.error {
            widgets::render_error(frame, layout.notification_area, error);
        } else if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::state::{
        Action, ChartPoint, CompanyDetails, CompanyOverview, StockQuote, TopMovers,
    };
    use chrono::NaiveDate;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx, &UiConfig::default())
    }

    fn draw(store: &Store) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let config = Config::default();
        terminal
            .draw(|frame| Ui::render(frame, store, &config))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn quote(symbol: &str, change: &str) -> StockQuote {
        StockQuote {
            id: format!("{symbol}0"),
            symbol: symbol.into(),
            name: symbol.into(),
            price: "10.00".into(),
            change_percentage: change.into(),
        }
    }

    #[test]
    fn test_home_renders_movers() {
        let mut store = store();
        store.reduce(Action::TopMoversLoaded(TopMovers {
            gainers: vec![quote("ABCD", "25.5%")],
            losers: vec![quote("WXYZ", "-12.1%")],
        }));

        let screen = draw(&store);
        assert!(screen.contains("FinStock"));
        assert!(screen.contains("ABCD"));
        assert!(screen.contains("WXYZ"));
    }

    #[test]
    fn test_error_panel_offers_retry() {
        let mut store = store();
        store.reduce(Action::TopMoversFailed(
            "API limit reached. Please try again later.".into(),
        ));

        let screen = draw(&store);
        assert!(screen.contains("API limit reached"));
        assert!(screen.contains("Press r to retry"));
    }

    #[test]
    fn test_details_without_price() {
        let mut store = store();
        store.reduce(Action::OpenDetails("IBM".into()));
        store.reduce(Action::DetailsLoaded {
            details: CompanyDetails {
                overview: CompanyOverview {
                    symbol: "IBM".into(),
                    name: Some("International Business Machines".into()),
                    ..Default::default()
                },
                price: None,
                change_percent: None,
            },
            chart: (1..=5)
                .map(|day| ChartPoint {
                    date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                    value: 180.0 + day as f64,
                })
                .collect(),
        });

        let screen = draw(&store);
        assert!(screen.contains("International Business Machines"));
        assert!(screen.contains("price unavailable"));
    }
}
