//! Top gainers/losers state for the home screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the market movers list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoverKind {
    #[default]
    Gainers,
    Losers,
}

impl MoverKind {
    /// The other side.
    pub fn toggle(self) -> Self {
        match self {
            Self::Gainers => Self::Losers,
            Self::Losers => Self::Gainers,
        }
    }
}

impl std::fmt::Display for MoverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gainers => write!(f, "Top Gainers"),
            Self::Losers => write!(f, "Top Losers"),
        }
    }
}

/// A stock quote summary as shown in the movers lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockQuote {
    /// Row identifier: ticker plus its position in the fetched list.
    pub id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Last price, as formatted by the provider.
    pub price: String,
    /// Change percentage, as formatted by the provider (e.g. `"12.5%"`).
    pub change_percentage: String,
}

impl StockQuote {
    /// Whether the change is negative.
    pub fn is_down(&self) -> bool {
        self.change_percentage.trim_start().starts_with('-')
    }
}

/// Both movers lists as returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopMovers {
    pub gainers: Vec<StockQuote>,
    pub losers: Vec<StockQuote>,
}

impl TopMovers {
    /// Consume and keep one side.
    pub fn into_side(self, kind: MoverKind) -> Vec<StockQuote> {
        match kind {
            MoverKind::Gainers => self.gainers,
            MoverKind::Losers => self.losers,
        }
    }

    /// True when the provider returned nothing on either side.
    pub fn is_empty(&self) -> bool {
        self.gainers.is_empty() && self.losers.is_empty()
    }
}

/// State for the home screen previews.
#[derive(Debug)]
pub struct MarketState {
    /// Gainers preview.
    pub gainers: Vec<StockQuote>,
    /// Losers preview.
    pub losers: Vec<StockQuote>,
    /// Number of rows kept per side.
    pub preview_count: usize,
    /// Section that has keyboard focus.
    pub focused: MoverKind,
    /// Selected row within the focused section.
    pub selected_index: usize,
    /// Whether movers are currently loading.
    pub loading: bool,
    /// Last fetch error, already converted to a user-facing message.
    pub error: Option<String>,
    /// Last update timestamp.
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for MarketState {
    fn default() -> Self {
        Self::new(4)
    }
}

impl MarketState {
    pub fn new(preview_count: usize) -> Self {
        Self {
            gainers: Vec::new(),
            losers: Vec::new(),
            preview_count,
            focused: MoverKind::default(),
            selected_index: 0,
            loading: false,
            error: None,
            last_updated: None,
        }
    }

    /// Mark a fetch as started.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Store freshly fetched movers, keeping only the preview rows.
    pub fn set_movers(&mut self, movers: TopMovers) {
        self.gainers = movers.gainers.into_iter().take(self.preview_count).collect();
        self.losers = movers.losers.into_iter().take(self.preview_count).collect();
        self.loading = false;
        self.error = None;
        self.last_updated = Some(Utc::now());
        self.clamp_selection();
    }

    /// Record a failed fetch.
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Rows in the focused section.
    pub fn focused_rows(&self) -> &[StockQuote] {
        match self.focused {
            MoverKind::Gainers => &self.gainers,
            MoverKind::Losers => &self.losers,
        }
    }

    /// The currently selected quote.
    pub fn selected(&self) -> Option<&StockQuote> {
        self.focused_rows().get(self.selected_index)
    }

    /// Move focus to the other section.
    pub fn toggle_focus(&mut self) {
        self.focused = self.focused.toggle();
        self.clamp_selection();
    }

    /// Move the selection by `delta` rows, clamped to the focused section.
    pub fn scroll(&mut self, delta: i32) {
        let max_index = self.focused_rows().len().saturating_sub(1) as i32;
        let next = (self.selected_index as i32 + delta).clamp(0, max_index.max(0));
        self.selected_index = next as usize;
    }

    fn clamp_selection(&mut self) {
        let max_index = self.focused_rows().len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max_index);
    }
}
