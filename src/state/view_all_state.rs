//! Paginated "view all" list of gainers or losers.
//!
//! The whole list is fetched at once; pages are revealed by slicing.

use super::{MoverKind, StockQuote};

/// State for the view-all screen.
#[derive(Debug)]
pub struct ViewAllState {
    /// Which list is shown.
    pub kind: MoverKind,
    /// Every row returned by the provider.
    pub all: Vec<StockQuote>,
    /// Rows revealed so far; always a prefix of `all`.
    pub displayed: Vec<StockQuote>,
    /// Current page, starting at 1.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Selected row within `displayed`.
    pub selected_index: usize,
    pub loading: bool,
    pub loading_more: bool,
    pub error: Option<String>,
}

impl Default for ViewAllState {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ViewAllState {
    pub fn new(page_size: usize) -> Self {
        Self {
            kind: MoverKind::default(),
            all: Vec::new(),
            displayed: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            selected_index: 0,
            loading: false,
            loading_more: false,
            error: None,
        }
    }

    /// Clear everything but the page size and kind.
    pub fn reset(&mut self) {
        let kind = self.kind;
        *self = Self::new(self.page_size);
        self.kind = kind;
    }

    /// A fetch for `kind` has started.
    pub fn begin_load(&mut self, kind: MoverKind) {
        self.kind = kind;
        self.loading = true;
        self.error = None;
        self.page = 1;
        self.selected_index = 0;
        self.all.clear();
        self.displayed.clear();
    }

    /// Store the full list and reveal the first page.
    pub fn set_rows(&mut self, rows: Vec<StockQuote>) {
        self.loading = false;
        self.error = None;
        self.page = 1;
        self.selected_index = 0;
        self.displayed = rows.iter().take(self.page_size).cloned().collect();
        self.all = rows;
    }

    /// Record a failed fetch.
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
        self.all.clear();
        self.displayed.clear();
    }

    /// Whether more rows can be revealed.
    pub fn has_more(&self) -> bool {
        self.displayed.len() < self.all.len()
    }

    /// Reveal the next page. Returns whether anything changed.
    pub fn load_more(&mut self) -> bool {
        if self.loading_more || !self.has_more() {
            return false;
        }
        self.loading_more = true;
        let next_page = self.page + 1;
        let end = (next_page * self.page_size).min(self.all.len());
        self.displayed = self.all[..end].to_vec();
        self.page = next_page;
        self.loading_more = false;
        true
    }

    /// The currently selected row.
    pub fn selected(&self) -> Option<&StockQuote> {
        self.displayed.get(self.selected_index)
    }

    /// Move the selection; moving past the last row reveals the next page.
    pub fn scroll(&mut self, delta: i32) {
        let last = self.displayed.len().saturating_sub(1) as i32;
        let wanted = self.selected_index as i32 + delta;
        if wanted > last && self.load_more() {
            let last = self.displayed.len().saturating_sub(1) as i32;
            self.selected_index = wanted.clamp(0, last) as usize;
            return;
        }
        self.selected_index = wanted.clamp(0, last.max(0)) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(n: usize) -> Vec<StockQuote> {
        (0..n)
            .map(|i| StockQuote {
                id: format!("T{i}{i}"),
                symbol: format!("T{i}"),
                name: format!("T{i}"),
                price: "2.00".into(),
                change_percentage: "5%".into(),
            })
            .collect()
    }

    #[test]
    fn test_first_page_after_fetch() {
        let mut state = ViewAllState::new(10);
        state.begin_load(MoverKind::Losers);
        assert!(state.loading);
        state.set_rows(rows(25));

        assert_eq!(state.kind, MoverKind::Losers);
        assert_eq!(state.displayed.len(), 10);
        assert_eq!(state.page, 1);
        assert!(state.has_more());
    }

    #[test]
    fn test_load_more_grows_until_exhausted() {
        let mut state = ViewAllState::new(10);
        state.set_rows(rows(25));

        let mut previous = state.displayed.len();
        let mut calls = 0;
        while state.load_more() {
            calls += 1;
            assert!(state.displayed.len() > previous);
            assert!(state.displayed.len() <= state.all.len());
            previous = state.displayed.len();
        }

        assert_eq!(calls, 2);
        assert_eq!(state.displayed.len(), 25);
        assert_eq!(state.page, 3);
        assert_eq!(state.displayed, state.all);
    }

    #[test]
    fn test_load_more_when_exhausted_is_noop() {
        let mut state = ViewAllState::new(10);
        state.set_rows(rows(7));
        assert_eq!(state.displayed.len(), 7);
        assert!(!state.load_more());
        assert_eq!(state.displayed.len(), 7);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_load_more_on_empty_list() {
        let mut state = ViewAllState::new(10);
        assert!(!state.load_more());
        assert!(state.displayed.is_empty());
    }

    #[test]
    fn test_load_more_blocked_while_loading_more() {
        let mut state = ViewAllState::new(10);
        state.set_rows(rows(30));
        state.loading_more = true;
        assert!(!state.load_more());
        assert_eq!(state.displayed.len(), 10);
    }

    #[test]
    fn test_scroll_past_end_reveals_next_page() {
        let mut state = ViewAllState::new(10);
        state.set_rows(rows(15));
        state.scroll(9);
        assert_eq!(state.selected_index, 9);
        state.scroll(1);
        assert_eq!(state.displayed.len(), 15);
        assert_eq!(state.selected_index, 10);
        state.scroll(100);
        assert_eq!(state.selected_index, 14);
    }

    #[test]
    fn test_fetch_resets_previous_pages() {
        let mut state = ViewAllState::new(10);
        state.set_rows(rows(30));
        state.load_more();
        state.begin_load(MoverKind::Gainers);
        assert_eq!(state.page, 1);
        assert!(state.displayed.is_empty());
        assert!(state.all.is_empty());
    }

    #[test]
    fn test_failure_clears_rows() {
        let mut state = ViewAllState::new(10);
        state.set_rows(rows(30));
        state.fail("Server error. Please try again later.".into());
        assert!(state.all.is_empty());
        assert!(state.displayed.is_empty());
        assert!(state.error.is_some());
    }
}
