//! User watchlists.
//!
//! This is the only persisted slice. Every mutation that actually changes
//! something bumps [`WatchlistState::revision`] so the app knows to write
//! the collection back to disk.

use serde::{Deserialize, Serialize};

use super::StockQuote;

/// A stock tracked in a watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistStock {
    pub symbol: String,
    pub name: String,
    pub price: String,
    pub change_percentage: String,
}

impl From<&StockQuote> for WatchlistStock {
    fn from(quote: &StockQuote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            name: quote.name.clone(),
            price: quote.price.clone(),
            change_percentage: quote.change_percentage.clone(),
        }
    }
}

/// A named, insertion-ordered set of stocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watchlist {
    pub name: String,
    pub stocks: Vec<WatchlistStock>,
}

impl Watchlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stocks: Vec::new(),
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.stocks.iter().any(|s| s.symbol == symbol)
    }
}

/// State for all watchlists.
#[derive(Debug, Default)]
pub struct WatchlistState {
    pub lists: Vec<Watchlist>,
    /// Selected watchlist on the watchlists screen.
    pub selected_index: usize,
    /// Selected stock inside the open watchlist.
    pub selected_stock: usize,
    /// Name of the watchlist whose stocks are shown.
    pub open: Option<String>,
    /// Incremented on every effective change.
    pub revision: u64,
}

impl WatchlistState {
    /// Replace the collection with one loaded from storage.
    pub fn restore(&mut self, lists: Vec<Watchlist>) {
        self.lists = lists;
        self.selected_index = 0;
        self.selected_stock = 0;
        self.open = None;
    }

    pub fn get(&self, name: &str) -> Option<&Watchlist> {
        self.lists.iter().find(|w| w.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Watchlist> {
        self.lists.iter_mut().find(|w| w.name == name)
    }

    /// Create an empty watchlist. Blank or duplicate names are ignored.
    pub fn create(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.get(name).is_some() {
            return false;
        }
        self.lists.push(Watchlist::new(name));
        self.revision += 1;
        true
    }

    /// Delete a watchlist by name.
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.lists.len();
        self.lists.retain(|w| w.name != name);
        if self.lists.len() == before {
            return false;
        }
        if self.open.as_deref() == Some(name) {
            self.open = None;
        }
        self.selected_index = self.selected_index.min(self.lists.len().saturating_sub(1));
        self.revision += 1;
        true
    }

    /// Add a stock. No-op if the watchlist is unknown or already holds the symbol.
    pub fn add(&mut self, watchlist: &str, stock: WatchlistStock) -> bool {
        let Some(list) = self.get_mut(watchlist) else {
            return false;
        };
        if list.contains(&stock.symbol) {
            return false;
        }
        list.stocks.push(stock);
        self.revision += 1;
        true
    }

    /// Remove a stock. No-op if it is not there.
    pub fn remove(&mut self, watchlist: &str, symbol: &str) -> bool {
        let Some(list) = self.get_mut(watchlist) else {
            return false;
        };
        let before = list.stocks.len();
        list.stocks.retain(|s| s.symbol != symbol);
        if list.stocks.len() == before {
            return false;
        }
        let remaining = list.stocks.len();
        self.selected_stock = self.selected_stock.min(remaining.saturating_sub(1));
        self.revision += 1;
        true
    }

    /// Whether any watchlist tracks `symbol`.
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.lists.iter().any(|w| w.contains(symbol))
    }

    pub fn selected(&self) -> Option<&Watchlist> {
        self.lists.get(self.selected_index)
    }

    /// The watchlist whose stocks are being browsed.
    pub fn opened(&self) -> Option<&Watchlist> {
        self.open.as_deref().and_then(|name| self.get(name))
    }

    pub fn selected_stock(&self) -> Option<&WatchlistStock> {
        self.opened().and_then(|w| w.stocks.get(self.selected_stock))
    }

    pub fn open_selected(&mut self) -> bool {
        match self.selected().map(|w| w.name.clone()) {
            Some(name) => {
                self.open = Some(name);
                self.selected_stock = 0;
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.open = None;
        self.selected_stock = 0;
    }

    pub fn scroll(&mut self, delta: i32) {
        if let Some(len) = self.opened().map(|w| w.stocks.len()) {
            self.selected_stock = clamp_index(self.selected_stock, delta, len);
        } else {
            self.selected_index = clamp_index(self.selected_index, delta, self.lists.len());
        }
    }
}

fn clamp_index(current: usize, delta: i32, len: usize) -> usize {
    let max_index = len.saturating_sub(1) as i32;
    (current as i32 + delta).clamp(0, max_index.max(0)) as usize
}
