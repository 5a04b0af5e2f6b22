//! Domain Models
//!
//! Shapes exchanged with data providers and handed back to the model.
//! Uses `rust_decimal` for all figures - never use f64 for money!

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry of a lookup result: a formatted line or a bare figure
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(#[serde(with = "rust_decimal::serde::float")] Decimal),
    Text(String),
}

impl std::fmt::Display for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Decimal> for DataValue {
    fn from(n: Decimal) -> Self {
        Self::Number(n)
    }
}

/// Ordered lookup result; empty means the provider had nothing
pub type DataResult = Vec<DataValue>;

/// Parallel date/value sequences (country-risk history)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    /// Canonical `YYYY-MM-DD` dates
    pub dates: Vec<String>,
    pub values: Vec<Decimal>,
}

impl HistoricalSeries {
    pub const fn new(dates: Vec<String>, values: Vec<Decimal>) -> Self {
        Self { dates, values }
    }

    /// Value recorded on exactly `date`
    pub fn value_on(&self, date: &str) -> Option<Decimal> {
        let idx = self.dates.iter().position(|d| d == date)?;
        self.values.get(idx).copied()
    }
}

/// Index series with its most recent reading (inflation, UVA, ...)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSeries {
    pub dates: Vec<String>,
    pub values: Vec<Decimal>,
    pub latest: Option<Decimal>,
}

impl IndexSeries {
    /// Build a series whose latest reading is its last value
    pub fn from_points(points: &[(&str, Decimal)]) -> Self {
        Self {
            dates: points.iter().map(|(d, _)| (*d).to_string()).collect(),
            values: points.iter().map(|(_, v)| *v).collect(),
            latest: points.last().map(|(_, v)| *v),
        }
    }
}
