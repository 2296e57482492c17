use super::value_objects::Symbol;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Single sample of a price series as served by `/api/live-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PricePoint {
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
}

impl PricePoint {
    pub fn new(close: f64) -> Self {
        Self {
            close,
            open: None,
            high: None,
            low: None,
            datetime: None,
        }
    }

    pub fn with_open(mut self, open: f64) -> Self {
        self.open = Some(open);
        self
    }

    pub fn with_datetime(mut self, datetime: impl Into<String>) -> Self {
        self.datetime = Some(datetime.into());
        self
    }
}

/// One live-data payload: zero or more named series plus the server time.
///
/// Keys that are not tracked symbols are ignored and a `null` series counts
/// as absent, so a payload missing `vix` still updates `dxy`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Value>")]
pub struct MarketSnapshot {
    series: BTreeMap<Symbol, Vec<PricePoint>>,
    timestamp: Option<String>,
}

impl MarketSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: Symbol, points: Vec<PricePoint>) -> Self {
        self.series.insert(symbol, points);
        self
    }

    pub fn series(&self, symbol: Symbol) -> Option<&[PricePoint]> {
        self.series.get(&symbol).map(Vec::as_slice)
    }

    /// Non-empty series in symbol order.
    pub fn non_empty_series(&self) -> impl Iterator<Item = (Symbol, &[PricePoint])> + '_ {
        self.series
            .iter()
            .filter(|(_, points)| !points.is_empty())
            .map(|(symbol, points)| (*symbol, points.as_slice()))
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}

impl TryFrom<BTreeMap<String, Value>> for MarketSnapshot {
    type Error = String;

    fn try_from(raw: BTreeMap<String, Value>) -> Result<Self, Self::Error> {
        let mut snapshot = MarketSnapshot::default();
        for (key, value) in raw {
            if key == "timestamp" {
                snapshot.timestamp = value.as_str().map(str::to_string);
                continue;
            }
            let Ok(symbol) = Symbol::from_str(&key) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            let points: Vec<PricePoint> = serde_json::from_value(value)
                .map_err(|e| format!("invalid series for {symbol}: {e}"))?;
            snapshot.series.insert(symbol, points);
        }
        Ok(snapshot)
    }
}

/// `{EUR, USD}` payload behind each fixing card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixingRates {
    #[serde(rename = "EUR")]
    pub eur: f64,
    #[serde(rename = "USD")]
    pub usd: f64,
}

impl FixingRates {
    pub fn new(eur: f64, usd: f64) -> Self {
        Self { eur, usd }
    }

    /// HTML fragment placed into the card body.
    pub fn to_card_html(&self) -> String {
        format!(
            "<div>EUR: <b>{}</b></div>\n<div>USD: <b>{}</b></div>",
            self.eur, self.usd
        )
    }
}
