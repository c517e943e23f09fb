//! Quote provider endpoints.

use crate::config::CacheConfig;
use crate::state::TimeRange;
use std::time::Duration;

/// A request against the provider's `query` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    TopGainersLosers,
    CompanyOverview(String),
    TimeSeries(TimeRange, String),
    GlobalQuote(String),
    SymbolSearch(String),
}

impl Endpoint {
    /// Value of the `function` query parameter.
    pub fn function(&self) -> &'static str {
        match self {
            Self::TopGainersLosers => "TOP_GAINERS_LOSERS",
            Self::CompanyOverview(_) => "OVERVIEW",
            Self::TimeSeries(TimeRange::OneDay, _) => "TIME_SERIES_DAILY",
            Self::TimeSeries(TimeRange::OneWeek, _) => "TIME_SERIES_WEEKLY",
            Self::TimeSeries(TimeRange::OneMonth, _) => "TIME_SERIES_MONTHLY",
            Self::GlobalQuote(_) => "GLOBAL_QUOTE",
            Self::SymbolSearch(_) => "SYMBOL_SEARCH",
        }
    }

    /// Query parameters, without the API key.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("function", self.function().to_string())];
        match self {
            Self::TopGainersLosers => {}
            Self::CompanyOverview(symbol)
            | Self::TimeSeries(_, symbol)
            | Self::GlobalQuote(symbol) => params.push(("symbol", symbol.clone())),
            Self::SymbolSearch(keywords) => params.push(("keywords", keywords.clone())),
        }
        params
    }

    /// Key identifying the response in the cache.
    pub fn cache_key(&self) -> String {
        self.params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// How long a response stays fresh.
    pub fn ttl(&self, cache: &CacheConfig) -> Duration {
        let secs = match self {
            Self::TopGainersLosers => cache.top_movers_secs,
            Self::CompanyOverview(_) => cache.overview_secs,
            Self::TimeSeries(TimeRange::OneDay, _) => cache.daily_series_secs,
            Self::TimeSeries(TimeRange::OneWeek, _) => cache.weekly_series_secs,
            Self::TimeSeries(TimeRange::OneMonth, _) => cache.monthly_series_secs,
            Self::GlobalQuote(_) => cache.global_quote_secs,
            Self::SymbolSearch(_) => cache.symbol_search_secs,
        };
        Duration::from_secs(secs)
    }
}
