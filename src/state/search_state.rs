//! Symbol search state.

use serde::{Deserialize, Serialize};

/// One symbol search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub symbol: String,
    pub name: String,
    /// Instrument type, e.g. "Equity" or "ETF".
    pub kind: String,
    pub region: String,
    pub currency: String,
    pub match_score: f64,
}

/// State for the search dropdown.
#[derive(Debug)]
pub struct SearchState {
    /// Current query text.
    pub query: String,
    /// Results for `query`.
    pub matches: Vec<SearchMatch>,
    pub selected_index: usize,
    /// A search for `query` is pending or in flight.
    pub loading: bool,
    /// Queries shorter than this never hit the network.
    pub min_len: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(2)
    }
}

impl SearchState {
    pub fn new(min_len: usize) -> Self {
        Self {
            query: String::new(),
            matches: Vec::new(),
            selected_index: 0,
            loading: false,
            min_len,
        }
    }

    /// Replace the query. Returns the query to search for, if it is long enough.
    pub fn set_query(&mut self, query: String) -> Option<String> {
        self.query = query;
        self.selected_index = 0;
        if self.query.trim().chars().count() < self.min_len {
            self.matches.clear();
            self.loading = false;
            return None;
        }
        self.loading = true;
        Some(self.query.trim().to_string())
    }

    pub fn push_char(&mut self, c: char) -> Option<String> {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.set_query(query)
    }

    pub fn pop_char(&mut self) -> Option<String> {
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.set_query(query)
    }

    /// Apply results if they belong to the current query.
    pub fn apply_results(&mut self, query: &str, matches: Vec<SearchMatch>) -> bool {
        if query != self.query.trim() {
            return false;
        }
        self.matches = matches;
        self.selected_index = 0;
        self.loading = false;
        true
    }

    /// A search failed; hide the dropdown if it was for the current query.
    pub fn fail(&mut self, query: &str) {
        if query == self.query.trim() {
            self.matches.clear();
            self.loading = false;
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.selected_index = 0;
        self.loading = false;
    }

    /// Whether the dropdown should be shown.
    pub fn show_dropdown(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn selected(&self) -> Option<&SearchMatch> {
        self.matches.get(self.selected_index)
    }

    pub fn scroll(&mut self, delta: i32) {
        let max_index = self.matches.len().saturating_sub(1) as i32;
        self.selected_index = (self.selected_index as i32 + delta).clamp(0, max_index.max(0)) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hit(symbol: &str) -> SearchMatch {
        SearchMatch {
            symbol: symbol.into(),
            name: format!("{symbol} Inc"),
            kind: "Equity".into(),
            region: "United States".into(),
            currency: "USD".into(),
            match_score: 1.0,
        }
    }

    #[test]
    fn test_short_query_does_not_search() {
        let mut state = SearchState::new(2);
        assert_eq!(state.push_char('I'), None);
        assert!(!state.loading);
        assert_eq!(state.push_char('B'), Some("IB".to_string()));
        assert!(state.loading);
    }

    #[test]
    fn test_shrinking_query_clears_results() {
        let mut state = SearchState::new(2);
        state.set_query("IB".into());
        state.apply_results("IB", vec![hit("IBM")]);
        assert!(state.show_dropdown());

        assert_eq!(state.pop_char(), None);
        assert!(!state.show_dropdown());
    }

    #[test]
    fn test_stale_results_ignored() {
        let mut state = SearchState::new(2);
        state.set_query("AP".into());
        state.set_query("APP".into());

        assert!(!state.apply_results("AP", vec![hit("APA")]));
        assert!(state.matches.is_empty());
        assert!(state.loading);

        assert!(state.apply_results("APP", vec![hit("AAPL"), hit("APPN")]));
        assert_eq!(state.matches.len(), 2);
        assert!(!state.loading);
    }

    #[test]
    fn test_failure_for_old_query_keeps_state() {
        let mut state = SearchState::new(2);
        state.set_query("MS".into());
        state.fail("M");
        assert!(state.loading);
        state.fail("MS");
        assert!(!state.loading);
    }

    #[test]
    fn test_selection() {
        let mut state = SearchState::new(2);
        state.set_query("TS".into());
        state.apply_results("TS", vec![hit("TSLA"), hit("TSM")]);
        state.scroll(5);
        assert_eq!(state.selected().map(|m| m.symbol.as_str()), Some("TSM"));
        state.clear();
        assert!(state.selected().is_none());
        assert!(state.query.is_empty());
    }
}
