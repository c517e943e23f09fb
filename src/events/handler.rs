//! Event handler for processing input events.

use super::InputEvent;
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, InputMode, MoverKind, Store, View};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// Poll timeout; doubles as the UI tick.
    tick_rate: Duration,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy)]
struct StoreSnapshot {
    input_mode: InputMode,
    current_view: View,
    focused_section: MoverKind,
    /// The current view shows a failed fetch.
    fetch_failed: bool,
    /// An app-level error popup is open.
    has_error: bool,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(keybindings: KeyBindings, tick_rate: Duration) -> Self {
        Self {
            keybindings,
            tick_rate,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
            focused_section: store.markets.focused,
            fetch_failed: store.fetch_error().is_some(),
            has_error: store.app.error.is_some(),
        });
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => return Ok(self.handle_key(key)),
                CrosstermEvent::Mouse(mouse) => return Ok(self.handle_mouse(mouse)),
                _ => {}
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot?;

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(key, snapshot),
            InputMode::Insert => self.handle_insert_mode(key),
            InputMode::Search => self.handle_search_mode(key),
            InputMode::Picker => self.handle_picker_mode(key),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(&self, key: KeyEvent, snapshot: StoreSnapshot) -> Option<Action> {
        let input = InputEvent::from(key);
        let kb = &self.keybindings;

        // Global shortcuts
        if input.matches(&kb.quit) || input.matches("Ctrl+c") {
            return Some(Action::Quit);
        }
        if input.matches(&kb.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&kb.refresh) {
            return Some(if snapshot.fetch_failed {
                Action::Retry
            } else {
                Action::Refresh
            });
        }
        if input.matches(&kb.back) {
            return Some(if snapshot.has_error {
                Action::ClearError
            } else {
                Action::Back
            });
        }

        // Tab switching
        if input.matches(&kb.home) {
            return Some(Action::SwitchTab(View::Home));
        }
        if input.matches(&kb.watchlists) {
            return Some(Action::SwitchTab(View::Watchlists));
        }
        if input.matches(&kb.search) {
            return Some(Action::SetInputMode(InputMode::Search));
        }

        // Navigation
        if input.matches(&kb.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&kb.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        if key.code == KeyCode::PageUp {
            return Some(Action::PageUp);
        }
        if key.code == KeyCode::PageDown {
            return Some(Action::PageDown);
        }
        if input.matches(&kb.select) {
            return Some(Action::Select);
        }

        // View-specific actions
        match snapshot.current_view {
            View::Home => self.handle_home_view(input, snapshot),
            View::ViewAll => self.handle_view_all_view(input),
            View::Details => self.handle_details_view(input, key),
            View::Watchlists | View::WatchlistDetail => self.handle_watchlists_view(input),
        }
    }

    fn handle_home_view(&self, input: InputEvent, snapshot: StoreSnapshot) -> Option<Action> {
        if input.matches(&self.keybindings.switch_section) {
            return Some(Action::FocusNextSection);
        }
        if input.matches(&self.keybindings.view_all) {
            return Some(Action::OpenViewAll(snapshot.focused_section));
        }
        None
    }

    fn handle_view_all_view(&self, input: InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.load_more) {
            return Some(Action::LoadMore);
        }
        None
    }

    fn handle_details_view(&self, input: InputEvent, key: KeyEvent) -> Option<Action> {
        let kb = &self.keybindings;
        if input.matches(&kb.next_range) || key.code == KeyCode::Right {
            return Some(Action::NextRange);
        }
        if input.matches(&kb.prev_range) || key.code == KeyCode::Left {
            return Some(Action::PrevRange);
        }
        if input.matches(&kb.add_to_watchlist) {
            return Some(Action::OpenWatchlistPicker);
        }
        None
    }

    fn handle_watchlists_view(&self, input: InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.new_watchlist) {
            return Some(Action::BeginNewWatchlist);
        }
        if input.matches(&self.keybindings.delete) {
            return Some(Action::DeleteSelected);
        }
        None
    }

    fn handle_insert_mode(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::SetInputMode(InputMode::Normal)),
            KeyCode::Enter => Some(Action::SubmitInput),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Left => Some(Action::CursorLeft),
            KeyCode::Right => Some(Action::CursorRight),
            _ => InputEvent::from(key).char().map(Action::InputChar),
        }
    }

    fn handle_search_mode(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::SetInputMode(InputMode::Normal)),
            KeyCode::Enter => Some(Action::Select),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Down => Some(Action::ScrollDown),
            _ => InputEvent::from(key).char().map(Action::SearchInput),
        }
    }

    fn handle_picker_mode(&self, key: KeyEvent) -> Option<Action> {
        let input = InputEvent::from(key);
        let kb = &self.keybindings;
        if input.matches(&kb.back) {
            return Some(Action::SetInputMode(InputMode::Normal));
        }
        if input.matches(&kb.select) {
            return Some(Action::Select);
        }
        if input.matches(&kb.new_watchlist) {
            return Some(Action::BeginNewWatchlist);
        }
        if input.matches(&kb.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&kb.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn handler_for(store: &Store) -> EventHandler {
        let mut handler = EventHandler::new(KeyBindings::default(), Duration::from_millis(10));
        handler.update_store_snapshot(store);
        handler
    }

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx, &UiConfig::default())
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_home_keys() {
        let store = store();
        let handler = handler_for(&store);
        assert!(matches!(handler.handle_key(press('q')), Some(Action::Quit)));
        assert!(matches!(
            handler.handle_key(press('v')),
            Some(Action::OpenViewAll(MoverKind::Gainers))
        ));
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Action::FocusNextSection)
        ));
        assert!(matches!(handler.handle_key(press('r')), Some(Action::Refresh)));
    }

    #[test]
    fn test_refresh_becomes_retry_after_failed_fetch() {
        let mut store = store();
        store.reduce(Action::LoadTopMovers);
        store.reduce(Action::TopMoversFailed(
            "Server error. Please try again later.".into(),
        ));
        store.record_failure(Action::LoadTopMovers);

        let handler = handler_for(&store);
        let action = handler.handle_key(press('r'));
        assert!(matches!(action, Some(Action::Retry)));
        // the replay is the failed fetch, not a cache-clearing refresh
        assert!(matches!(store.reduce(Action::Retry), Some(Action::LoadTopMovers)));
    }

    #[test]
    fn test_failed_details_retry_and_back() {
        let mut store = store();
        store.reduce(Action::OpenDetails("IBM".into()));
        store.reduce(Action::DetailsFailed("No data found for this symbol.".into()));

        let handler = handler_for(&store);
        assert!(matches!(handler.handle_key(press('r')), Some(Action::Retry)));
        // a slice error is not a popup, so Esc still leaves the screen
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::Back)
        ));
    }

    #[test]
    fn test_escape_dismisses_error_popup() {
        let mut store = store();
        store.reduce(Action::SetError("Could not save watchlists".into()));
        let handler = handler_for(&store);
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::ClearError)
        ));
        // no failed fetch on screen, so r is a plain refresh
        assert!(matches!(handler.handle_key(press('r')), Some(Action::Refresh)));
    }

    #[test]
    fn test_search_mode_captures_text() {
        let mut store = store();
        store.reduce(Action::SetInputMode(InputMode::Search));
        let handler = handler_for(&store);
        // 'q' is text here, not quit
        assert!(matches!(handler.handle_key(press('q')), Some(Action::SearchInput('q'))));
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::SetInputMode(InputMode::Normal))
        ));
    }

    #[test]
    fn test_details_range_keys() {
        let mut store = store();
        store.reduce(Action::OpenDetails("IBM".into()));
        let handler = handler_for(&store);
        assert!(matches!(handler.handle_key(press(']')), Some(Action::NextRange)));
        assert!(matches!(handler.handle_key(press('[')), Some(Action::PrevRange)));
        assert!(matches!(
            handler.handle_key(press('a')),
            Some(Action::OpenWatchlistPicker)
        ));
    }
}
