//! Chart response decoding
//!
//! The chart service returns parallel series of optional values, one entry
//! per period. The newest period is often still open and reported as
//! `null`, so every reading falls back one period.

use crate::PriceError;
use serde::Deserialize;
use stocksight_domain::StockQuote;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Latest readings extracted from a chart response
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartSnapshot {
    /// Last close
    pub last: Option<f64>,
    /// Latest period high
    pub high: Option<f64>,
    /// Latest period low
    pub low: Option<f64>,
    /// Latest period volume
    pub vol: Option<f64>,
    /// Percent change between the last two closes
    pub change: Option<f64>,
}

impl ChartSnapshot {
    /// Whether last, high and low are all known
    pub fn is_complete(&self) -> bool {
        self.last.is_some() && self.high.is_some() && self.low.is_some()
    }

    /// Build a quote, or `None` when last, high or low is missing
    pub fn into_quote(self, symbol: &str, date: impl Into<String>) -> Option<StockQuote> {
        Some(StockQuote {
            symbol: symbol.to_string(),
            last: self.last?,
            date: date.into(),
            change: self.change,
            high: self.high?,
            low: self.low?,
            vol: self.vol,
        })
    }
}

/// Decode a chart response body
///
/// # Errors
///
/// Returns [`PriceError::InvalidResponse`] for malformed JSON or a response
/// without any result or quote series.
pub fn decode_chart(body: &str) -> Result<ChartSnapshot, PriceError> {
    let response: ChartResponse = serde_json::from_str(body)?;
    let series = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .and_then(|result| result.indicators.quote.into_iter().next())
        .ok_or_else(|| PriceError::InvalidResponse("chart has no quote series".to_string()))?;

    Ok(ChartSnapshot {
        last: latest(&series.close),
        high: latest(&series.high),
        low: latest(&series.low),
        vol: latest(&series.volume),
        change: percent_change(&series.close),
    })
}

/// Newest value of a series, or the one before it when the newest is null
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    let mut newest = series.iter().rev();
    match newest.next() {
        Some(Some(value)) => Some(*value),
        Some(None) => newest.next().copied().flatten(),
        None => None,
    }
}

/// Percent change between the two newest closes
///
/// When that pair is incomplete the pair one period older is used.
pub fn percent_change(closes: &[Option<f64>]) -> Option<f64> {
    let n = closes.len();
    let pair = |newer: usize, older: usize| -> Option<f64> {
        let current = (*closes.get(newer)?)?;
        let previous = (*closes.get(older)?)?;
        if previous == 0.0 {
            return None;
        }
        Some((current - previous) / previous * 100.0)
    };

    if n < 2 {
        return None;
    }
    pair(n - 1, n - 2).or_else(|| if n >= 3 { pair(n - 2, n - 3) } else { None })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(close: &str, high: &str, low: &str, volume: &str) -> String {
        format!(
            r#"{{"chart": {{"result": [{{"meta": {{"symbol": "AMZN"}}, "indicators": {{"quote": [{{"close": {}, "high": {}, "low": {}, "volume": {}}}]}}}}], "error": null}}}}"#,
            close, high, low, volume
        )
    }

    #[test]
    fn test_decode_latest_values() {
        let snapshot = decode_chart(&body("[100.0, 110.0]", "[101.0, 111.0]", "[99.0, 109.0]", "[500, 700]")).unwrap();
        assert_eq!(snapshot.last, Some(110.0));
        assert_eq!(snapshot.high, Some(111.0));
        assert_eq!(snapshot.low, Some(109.0));
        assert_eq!(snapshot.vol, Some(700.0));
        assert_eq!(snapshot.change, Some(10.0));
        assert!(snapshot.is_complete());
    }

    #[test]
    fn test_null_falls_back_one_period() {
        let snapshot = decode_chart(&body(
            "[100.0, 125.0, null]",
            "[101.0, 126.0, null]",
            "[99.0, 120.0, null]",
            "[500, 800, null]",
        ))
        .unwrap();
        assert_eq!(snapshot.last, Some(125.0));
        assert_eq!(snapshot.high, Some(126.0));
        assert_eq!(snapshot.low, Some(120.0));
        assert_eq!(snapshot.vol, Some(800.0));
        assert_eq!(snapshot.change, Some(25.0));
    }

    #[test]
    fn test_two_nulls_leave_value_missing() {
        let snapshot = decode_chart(&body("[100.0, null, null]", "[1.0]", "[1.0]", "[]")).unwrap();
        assert_eq!(snapshot.last, None);
        assert_eq!(snapshot.vol, None);
        assert!(!snapshot.is_complete());
        assert_eq!(snapshot.into_quote("AMZN", "2020-01-01T00:00:00"), None);
    }

    #[test]
    fn test_into_quote() {
        let snapshot = ChartSnapshot {
            last: Some(10.0),
            high: Some(11.0),
            low: Some(9.0),
            vol: None,
            change: Some(-1.5),
        };
        let quote = snapshot.into_quote("TSLA", "2020-01-01T00:00:00").unwrap();
        assert_eq!(quote.symbol, "TSLA");
        assert_eq!(quote.last, 10.0);
        assert_eq!(quote.change, Some(-1.5));
        assert_eq!(quote.vol, None);
    }

    #[test]
    fn test_percent_change_edges() {
        assert_eq!(percent_change(&[]), None);
        assert_eq!(percent_change(&[Some(1.0)]), None);
        assert_eq!(percent_change(&[Some(0.0), Some(5.0)]), None);
        assert_eq!(percent_change(&[Some(50.0), Some(100.0), None]), Some(100.0));
        assert_eq!(percent_change(&[Some(100.0), None]), None);
    }

    #[test]
    fn test_missing_result_is_invalid() {
        let result = decode_chart(r#"{"chart": {"result": null, "error": {"code": "Not Found"}}}"#);
        assert!(matches!(result, Err(PriceError::InvalidResponse(_))));

        let result = decode_chart(r#"{"chart": {"result": [{"indicators": {"quote": []}}]}}"#);
        assert!(matches!(result, Err(PriceError::InvalidResponse(_))));

        assert!(matches!(decode_chart("<html>"), Err(PriceError::InvalidResponse(_))));
    }
}
