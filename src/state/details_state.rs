//! Company details and price-history state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Price-history range shown on the details screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    OneDay,
    OneWeek,
    OneMonth,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [Self::OneDay, Self::OneWeek, Self::OneMonth];

    /// Short label used in the range selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
        }
    }

    /// Number of most recent points plotted for this range.
    pub fn point_count(self) -> usize {
        match self {
            Self::OneDay => 16,
            Self::OneWeek | Self::OneMonth => 12,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::OneDay => Self::OneWeek,
            Self::OneWeek => Self::OneMonth,
            Self::OneMonth => Self::OneDay,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::OneDay => Self::OneMonth,
            Self::OneWeek => Self::OneDay,
            Self::OneMonth => Self::OneWeek,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Company fundamentals as reported by the provider.
///
/// The provider formats every field as a string and uses `"None"` or `"-"`
/// for missing values, so nothing here is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyOverview {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "AssetType")]
    pub asset_type: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Exchange")]
    pub exchange: Option<String>,
    #[serde(rename = "Currency")]
    pub currency: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Sector")]
    pub sector: Option<String>,
    #[serde(rename = "Industry")]
    pub industry: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    pub market_cap: Option<String>,
    #[serde(rename = "PERatio")]
    pub pe_ratio: Option<String>,
    #[serde(rename = "EPS")]
    pub eps: Option<String>,
    #[serde(rename = "Beta")]
    pub beta: Option<String>,
    #[serde(rename = "DividendYield")]
    pub dividend_yield: Option<String>,
    #[serde(rename = "ProfitMargin")]
    pub profit_margin: Option<String>,
    #[serde(rename = "AnalystTargetPrice")]
    pub analyst_target_price: Option<String>,
    #[serde(rename = "52WeekHigh")]
    pub week_52_high: Option<String>,
    #[serde(rename = "52WeekLow")]
    pub week_52_low: Option<String>,
    #[serde(rename = "50DayMovingAverage")]
    pub moving_average_50: Option<String>,
    #[serde(rename = "200DayMovingAverage")]
    pub moving_average_200: Option<String>,
}

/// Overview merged with the live quote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDetails {
    pub overview: CompanyOverview,
    /// Latest price; `None` when the quote fetch failed.
    pub price: Option<String>,
    /// Latest change percent; `None` when the quote fetch failed.
    pub change_percent: Option<String>,
}

impl CompanyDetails {
    /// Human readable label/value rows for the "about" panel.
    pub fn fundamentals(&self) -> Vec<(&'static str, &str)> {
        let o = &self.overview;
        [
            ("Sector", &o.sector),
            ("Industry", &o.industry),
            ("Market Cap", &o.market_cap),
            ("P/E Ratio", &o.pe_ratio),
            ("EPS", &o.eps),
            ("Beta", &o.beta),
            ("Dividend Yield", &o.dividend_yield),
            ("Profit Margin", &o.profit_margin),
            ("Target Price", &o.analyst_target_price),
            ("52W High", &o.week_52_high),
            ("52W Low", &o.week_52_low),
            ("50D Avg", &o.moving_average_50),
            ("200D Avg", &o.moving_average_200),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }
}

/// State for the details screen.
#[derive(Debug, Default)]
pub struct DetailsState {
    /// Symbol being shown.
    pub symbol: Option<String>,
    pub company: Option<CompanyDetails>,
    pub chart: Vec<ChartPoint>,
    pub selected_range: TimeRange,
    /// Full fetch (company + chart) in flight.
    pub loading: bool,
    /// Chart-only fetch in flight.
    pub chart_loading: bool,
    pub error: Option<String>,
}

impl DetailsState {
    /// Start showing `symbol`, discarding anything from a previous symbol.
    pub fn open(&mut self, symbol: String) {
        if self.symbol.as_deref() != Some(symbol.as_str()) {
            self.reset();
        }
        self.symbol = Some(symbol);
    }

    /// Whether a range change only needs a chart refetch.
    pub fn has_company(&self) -> bool {
        self.company.is_some()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn set_details(&mut self, company: CompanyDetails, chart: Vec<ChartPoint>) {
        self.loading = false;
        self.company = Some(company);
        self.chart = chart;
        self.error = None;
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.chart_loading = false;
        self.error = Some(message);
    }

    /// Select a range; the chart is cleared until the new series arrives.
    pub fn select_range(&mut self, range: TimeRange) -> bool {
        if self.chart_loading || range == self.selected_range {
            return false;
        }
        self.selected_range = range;
        true
    }

    pub fn begin_chart_load(&mut self) {
        self.chart_loading = true;
        self.chart.clear();
    }

    pub fn set_chart(&mut self, chart: Vec<ChartPoint>) {
        self.chart_loading = false;
        self.chart = chart;
    }

    /// Back to the initial state; used when leaving the screen.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Lowest and highest closing price in the chart.
    pub fn chart_bounds(&self) -> Option<(f64, f64)> {
        self.chart.iter().map(|p| p.value).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(day: u32, value: f64) -> ChartPoint {
        ChartPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            value,
        }
    }

    #[test]
    fn test_range_cycle() {
        assert_eq!(TimeRange::OneDay.next(), TimeRange::OneWeek);
        assert_eq!(TimeRange::OneMonth.next(), TimeRange::OneDay);
        assert_eq!(TimeRange::OneDay.prev(), TimeRange::OneMonth);
        assert_eq!(TimeRange::OneDay.point_count(), 16);
        assert_eq!(TimeRange::OneWeek.point_count(), 12);
    }

    #[test]
    fn test_open_new_symbol_resets() {
        let mut state = DetailsState::default();
        state.open("IBM".into());
        state.set_details(CompanyDetails::default(), vec![point(1, 1.0)]);
        state.selected_range = TimeRange::OneMonth;

        state.open("IBM".into());
        assert!(state.has_company());

        state.open("AAPL".into());
        assert!(!state.has_company());
        assert!(state.chart.is_empty());
        assert_eq!(state.selected_range, TimeRange::OneDay);
    }

    #[test]
    fn test_select_range_blocked_while_chart_loading() {
        let mut state = DetailsState::default();
        assert!(state.select_range(TimeRange::OneWeek));
        state.begin_chart_load();
        assert!(!state.select_range(TimeRange::OneMonth));
        assert_eq!(state.selected_range, TimeRange::OneWeek);
        state.set_chart(vec![point(1, 3.0)]);
        assert!(!state.chart_loading);
        assert!(!state.select_range(TimeRange::OneWeek));
    }

    #[test]
    fn test_chart_bounds() {
        let mut state = DetailsState::default();
        assert_eq!(state.chart_bounds(), None);
        state.set_chart(vec![point(1, 3.0), point(2, 1.5), point(3, 4.25)]);
        assert_eq!(state.chart_bounds(), Some((1.5, 4.25)));
    }

    #[test]
    fn test_fundamentals_skip_missing() {
        let details = CompanyDetails {
            overview: CompanyOverview {
                symbol: "IBM".into(),
                sector: Some("TECHNOLOGY".into()),
                pe_ratio: Some("22.1".into()),
                ..Default::default()
            },
            price: None,
            change_percent: None,
        };
        assert_eq!(
            details.fundamentals(),
            vec![("Sector", "TECHNOLOGY"), ("P/E Ratio", "22.1")]
        );
    }
}
