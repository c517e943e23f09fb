//! Application-level state.

use super::{Action, Notification};

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    ViewAll,
    Details,
    Watchlists,
    WatchlistDetail,
}

impl View {
    /// Top-level tab a view belongs to.
    pub fn tab(self) -> View {
        match self {
            View::Home | View::ViewAll | View::Details => View::Home,
            View::Watchlists | View::WatchlistDetail => View::Watchlists,
        }
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a new watchlist name.
    Insert,
    /// Typing a search query.
    Search,
    /// Choosing a watchlist for the current stock.
    Picker,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Views to return to on "back".
    pub history: Vec<View>,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Mode to return to after leaving insert mode.
    pub return_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Current error message.
    pub error: Option<String>,
    /// Whether a fetch is running.
    pub loading: bool,
    /// Whether the API host is reachable.
    pub connected: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Current insert-mode input.
    pub input_buffer: String,
    /// Cursor position in input buffer.
    pub cursor_position: usize,
    /// Selected row in the watchlist picker.
    pub picker_index: usize,
    /// Fetch to replay on retry or when connectivity returns.
    pub last_failed: Option<Action>,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self {
            current_view: View::Home,
            input_mode: InputMode::Normal,
            connected: true,
            ..Default::default()
        }
    }

    /// Go to a view, remembering where we came from.
    pub fn navigate(&mut self, view: View) {
        if view != self.current_view {
            self.history.push(self.current_view);
            self.current_view = view;
        }
    }

    /// Switch tabs, dropping the back stack.
    pub fn switch_tab(&mut self, view: View) {
        self.history.clear();
        self.current_view = view;
    }

    /// Return to the previous view. Returns the view that was left.
    pub fn back(&mut self) -> Option<View> {
        let previous = self.history.pop()?;
        Some(std::mem::replace(&mut self.current_view, previous))
    }

    /// Clear the input buffer.
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Add a character to the input buffer.
    pub fn push_char(&mut self, c: char) {
        let byte_index = self.byte_index();
        self.input_buffer.insert(byte_index, c);
        self.cursor_position += 1;
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_index = self.byte_index();
            self.input_buffer.remove(byte_index);
        }
    }

    /// Move cursor left.
    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            self.cursor_position += 1;
        }
    }

    fn byte_index(&self) -> usize {
        self.input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len())
    }
}
