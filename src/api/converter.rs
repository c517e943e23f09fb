//! Data conversion utilities for API responses.

use crate::error::{Error, Result};
use crate::state::{ChartPoint, CompanyOverview, SearchMatch, StockQuote, TimeRange, TopMovers};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct RawMover {
    ticker: String,
    price: String,
    change_percentage: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTopMovers {
    top_gainers: Vec<RawMover>,
    top_losers: Vec<RawMover>,
}

#[derive(Debug, Deserialize)]
struct RawBar {
    #[serde(rename = "4. close")]
    close: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSearchMatch {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name")]
    name: String,
    #[serde(rename = "3. type", default)]
    kind: String,
    #[serde(rename = "4. region", default)]
    region: String,
    #[serde(rename = "8. currency", default)]
    currency: String,
    #[serde(rename = "9. matchScore", default)]
    match_score: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSearch {
    #[serde(rename = "bestMatches")]
    best_matches: Vec<RawSearchMatch>,
}

/// Converts API responses to internal state types.
pub struct DataConverter;

impl DataConverter {
    /// Reject bodies that carry a provider notice instead of data.
    ///
    /// The provider answers throttled calls with HTTP 200 and a lone `Note`
    /// or `Information` field, and bad calls with `Error Message`.
    pub fn check_notice(body: &Value) -> Result<()> {
        let Some(object) = body.as_object() else {
            return Ok(());
        };
        if let Some(message) = object.get("Error Message").and_then(Value::as_str) {
            return Err(Error::invalid_input(message));
        }
        let notice = object
            .get("Note")
            .or_else(|| object.get("Information"))
            .and_then(Value::as_str);
        match notice {
            Some(message) if object.len() == 1 => Err(Error::ApiLimitReached(message.to_string())),
            _ => Ok(()),
        }
    }

    /// Convert the gainers/losers payload. Both lists empty means the
    /// provider is withholding data.
    pub fn convert_top_movers(body: Value) -> Result<TopMovers> {
        let raw: RawTopMovers = serde_json::from_value(body)?;
        let movers = TopMovers {
            gainers: Self::convert_movers(raw.top_gainers),
            losers: Self::convert_movers(raw.top_losers),
        };
        if movers.is_empty() {
            return Err(Error::ApiLimitReached(
                "no gainers or losers returned".to_string(),
            ));
        }
        Ok(movers)
    }

    fn convert_movers(raw: Vec<RawMover>) -> Vec<StockQuote> {
        raw.into_iter()
            .enumerate()
            .map(|(idx, m)| StockQuote {
                id: format!("{}{}", m.ticker, idx),
                name: m.ticker.clone(),
                symbol: m.ticker,
                price: m.price,
                change_percentage: m.change_percentage,
            })
            .collect()
    }

    /// Convert a company overview. The provider returns `{}` for unknown symbols.
    pub fn convert_overview(symbol: &str, body: Value) -> Result<CompanyOverview> {
        if body.as_object().is_none_or(|o| o.is_empty()) {
            return Err(Error::NotFound(symbol.to_string()));
        }
        let mut overview: CompanyOverview = serde_json::from_value(body)?;
        if overview.symbol.is_empty() {
            overview.symbol = symbol.to_string();
        }
        Ok(overview)
    }

    /// Convert a daily/weekly/monthly series into the most recent closing
    /// prices, oldest first.
    pub fn convert_time_series(range: TimeRange, body: Value) -> Result<Vec<ChartPoint>> {
        let key = Self::series_key(range);
        let Some(series) = body.get(key) else {
            return Ok(Vec::new());
        };
        let bars: BTreeMap<String, RawBar> = serde_json::from_value(series.clone())?;

        let mut points = bars
            .into_iter()
            .rev()
            .take(range.point_count())
            .map(|(date, bar)| {
                let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .map_err(|e| Error::decode(format!("bad series date {date}: {e}")))?;
                let value = bar
                    .close
                    .parse::<f64>()
                    .map_err(|e| Error::decode(format!("bad close {}: {e}", bar.close)))?;
                Ok(ChartPoint { date, value })
            })
            .collect::<Result<Vec<_>>>()?;
        points.reverse();
        Ok(points)
    }

    fn series_key(range: TimeRange) -> &'static str {
        match range {
            TimeRange::OneDay => "Time Series (Daily)",
            TimeRange::OneWeek => "Weekly Time Series",
            TimeRange::OneMonth => "Monthly Time Series",
        }
    }

    /// Extract price and change percent from a global quote.
    pub fn convert_global_quote(body: Value) -> Result<(Option<String>, Option<String>)> {
        let quote = match body.get("Global Quote") {
            Some(quote) => serde_json::from_value::<RawGlobalQuote>(quote.clone())?,
            None => RawGlobalQuote::default(),
        };
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        Ok((non_empty(quote.price), non_empty(quote.change_percent)))
    }

    /// Convert symbol search results.
    pub fn convert_search(body: Value) -> Result<Vec<SearchMatch>> {
        let raw: RawSearch = serde_json::from_value(body)?;
        Ok(raw
            .best_matches
            .into_iter()
            .map(|m| SearchMatch {
                match_score: m.match_score.parse().unwrap_or(0.0),
                symbol: m.symbol,
                name: m.name,
                kind: m.kind,
                region: m.region,
                currency: m.currency,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_top_movers_ids_and_fields() {
        let body = json!({
            "metadata": "Top gainers, losers, and most actively traded US tickers",
            "top_gainers": [
                {"ticker": "ABCD", "price": "1.23", "change_amount": "0.5", "change_percentage": "68.5%", "volume": "10"},
                {"ticker": "EFG", "price": "4.00", "change_amount": "1", "change_percentage": "33%", "volume": "20"}
            ],
            "top_losers": [
                {"ticker": "XYZ", "price": "0.10", "change_amount": "-0.2", "change_percentage": "-66.7%", "volume": "5"}
            ]
        });
        let movers = DataConverter::convert_top_movers(body).unwrap();
        assert_eq!(movers.gainers.len(), 2);
        assert_eq!(movers.gainers[1].id, "EFG1");
        assert_eq!(movers.gainers[0].change_percentage, "68.5%");
        assert_eq!(movers.losers[0].symbol, "XYZ");
        assert!(movers.losers[0].is_down());
    }

    #[test]
    fn test_empty_movers_is_api_limit() {
        let body = json!({"top_gainers": [], "top_losers": []});
        let err = DataConverter::convert_top_movers(body).unwrap_err();
        assert!(matches!(err, Error::ApiLimitReached(_)));
        assert_eq!(err.user_message(), "API limit reached. Please try again later.");

        let missing = DataConverter::convert_top_movers(json!({})).unwrap_err();
        assert!(matches!(missing, Error::ApiLimitReached(_)));
    }

    #[test]
    fn test_notice_detection() {
        let note = json!({"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."});
        assert!(matches!(
            DataConverter::check_notice(&note),
            Err(Error::ApiLimitReached(_))
        ));
        let info = json!({"Information": "rate limit"});
        assert!(DataConverter::check_notice(&info).is_err());
        let bad = json!({"Error Message": "Invalid API call."});
        assert!(matches!(
            DataConverter::check_notice(&bad),
            Err(Error::InvalidInput(_))
        ));
        let data = json!({"Information": "delayed data", "top_gainers": []});
        assert!(DataConverter::check_notice(&data).is_ok());
        assert!(DataConverter::check_notice(&json!([])).is_ok());
    }

    #[test]
    fn test_overview() {
        let body = json!({
            "Symbol": "IBM",
            "AssetType": "Common Stock",
            "Name": "International Business Machines",
            "Sector": "TECHNOLOGY",
            "52WeekHigh": "199.18",
            "PERatio": "22.5",
            "Unlisted": "ignored"
        });
        let overview = DataConverter::convert_overview("IBM", body).unwrap();
        assert_eq!(overview.symbol, "IBM");
        assert_eq!(overview.week_52_high.as_deref(), Some("199.18"));
        assert_eq!(overview.pe_ratio.as_deref(), Some("22.5"));
        assert_eq!(overview.industry, None);

        let err = DataConverter::convert_overview("NOPE", json!({})).unwrap_err();
        assert!(matches!(err, Error::NotFound(ref s) if s == "NOPE"));
    }

    #[test]
    fn test_daily_series_latest_sixteen_chronological() {
        let mut series = serde_json::Map::new();
        for day in 1..=20u32 {
            series.insert(
                format!("2024-03-{day:02}"),
                json!({"1. open": "1", "2. high": "1", "3. low": "1", "4. close": format!("{day}.5"), "5. volume": "1"}),
            );
        }
        let body = json!({"Meta Data": {}, "Time Series (Daily)": Value::Object(series)});

        let points = DataConverter::convert_time_series(TimeRange::OneDay, body).unwrap();
        assert_eq!(points.len(), 16);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(points[0].value, 5.5);
        assert_eq!(points[15].value, 20.5);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_weekly_series_takes_twelve() {
        let mut series = serde_json::Map::new();
        for week in 1..=30u32 {
            let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + chrono::Duration::weeks(week as i64);
            series.insert(date.to_string(), json!({"4. close": "10.0"}));
        }
        let body = json!({"Weekly Time Series": Value::Object(series)});
        let points = DataConverter::convert_time_series(TimeRange::OneWeek, body).unwrap();
        assert_eq!(points.len(), 12);
    }

    #[test]
    fn test_missing_series_is_empty() {
        let body = json!({"Meta Data": {}});
        let points = DataConverter::convert_time_series(TimeRange::OneMonth, body).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_global_quote() {
        let body = json!({"Global Quote": {"01. symbol": "IBM", "05. price": "185.00", "10. change percent": "-0.42%"}});
        assert_eq!(
            DataConverter::convert_global_quote(body).unwrap(),
            (Some("185.00".to_string()), Some("-0.42%".to_string()))
        );
        assert_eq!(
            DataConverter::convert_global_quote(json!({"Global Quote": {}})).unwrap(),
            (None, None)
        );
        assert_eq!(DataConverter::convert_global_quote(json!({})).unwrap(), (None, None));
    }

    #[test]
    fn test_search() {
        let body = json!({"bestMatches": [
            {"1. symbol": "TSCO.LON", "2. name": "Tesco PLC", "3. type": "Equity", "4. region": "United Kingdom",
             "5. marketOpen": "08:00", "6. marketClose": "16:30", "7. timezone": "UTC+01", "8. currency": "GBX", "9. matchScore": "0.7273"}
        ]});
        let matches = DataConverter::convert_search(body).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].symbol, "TSCO.LON");
        assert_eq!(matches[0].currency, "GBX");
        assert!((matches[0].match_score - 0.7273).abs() < 1e-9);

        assert!(DataConverter::convert_search(json!({})).unwrap().is_empty());
    }
}
