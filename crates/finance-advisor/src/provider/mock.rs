//! Mock Data Provider
//!
//! For testing and demo purposes. Returns realistic static figures.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::FinancialDataProvider;
use crate::error::Result;
use crate::model::{HistoricalSeries, IndexSeries};

/// Mock provider with static data
pub struct MockDataProvider {
    /// Pretend every source is empty (for "no data" paths)
    empty: bool,
}

impl Default for MockDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDataProvider {
    pub const fn new() -> Self {
        Self { empty: false }
    }

    /// A provider that has no data for anything
    pub const fn empty() -> Self {
        Self { empty: true }
    }

    fn lines(&self, rows: &[(&str, Decimal, Decimal)]) -> Vec<String> {
        if self.empty {
            return Vec::new();
        }
        // (label, price, 24h change)
        rows.iter()
            .map(|(label, price, change)| format!("{label}: ${price:.2} ({change:+.2}% 24h)"))
            .collect()
    }

    fn series(&self, points: &[(&str, Decimal)]) -> IndexSeries {
        if self.empty {
            IndexSeries::default()
        } else {
            IndexSeries::from_points(points)
        }
    }
}

#[async_trait]
impl FinancialDataProvider for MockDataProvider {
    async fn top_cryptos(&self) -> Result<Vec<String>> {
        Ok(self.lines(&[
            ("BTC", dec!(97500), dec!(2.5)),
            ("ETH", dec!(3450), dec!(1.8)),
            ("USDT", dec!(1.00), dec!(0.0)),
            ("BNB", dec!(690), dec!(-0.4)),
            ("SOL", dec!(195), dec!(4.2)),
        ]))
    }

    async fn top_stocks(&self) -> Result<Vec<String>> {
        Ok(self.lines(&[
            ("YPFD", dec!(38450), dec!(1.9)),
            ("GGAL", dec!(7320), dec!(3.4)),
            ("PAMP", dec!(3580), dec!(-0.6)),
            ("BMA", dec!(11200), dec!(2.1)),
            ("TXAR", dec!(965), dec!(0.3)),
        ]))
    }

    async fn fx_quotes(&self) -> Result<Vec<String>> {
        if self.empty {
            return Ok(Vec::new());
        }
        // (name, buy, sell)
        Ok([
            ("Dólar Oficial", dec!(1015.00), dec!(1055.00)),
            ("Dólar Blue", dec!(1180.00), dec!(1200.00)),
            ("Dólar MEP", dec!(1165.40), dec!(1172.80)),
            ("Dólar CCL", dec!(1190.10), dec!(1198.60)),
        ]
        .iter()
        .map(|(name, buy, sell)| format!("{name}: buy ${buy:.2} / sell ${sell:.2}"))
        .collect())
    }

    async fn country_risk(&self) -> Result<Option<String>> {
        if self.empty {
            return Ok(None);
        }
        Ok(Some("Country Risk 2024-06-14: 1412 points".into()))
    }

    async fn country_risk_history(&self) -> Result<HistoricalSeries> {
        if self.empty {
            return Ok(HistoricalSeries::default());
        }
        let points = [
            ("2024-06-10", dec!(1389)),
            ("2024-06-11", dec!(1401)),
            ("2024-06-12", dec!(1425)),
            ("2024-06-13", dec!(1418)),
            ("2024-06-14", dec!(1412)),
        ];
        Ok(HistoricalSeries::new(
            points.iter().map(|(d, _)| (*d).to_string()).collect(),
            points.iter().map(|(_, v)| *v).collect(),
        ))
    }

    async fn inflation_index(&self) -> Result<IndexSeries> {
        Ok(self.series(&[
            ("2024-03-31", dec!(11.0)),
            ("2024-04-30", dec!(8.8)),
            ("2024-05-31", dec!(4.2)),
        ]))
    }

    async fn inflation_yoy_index(&self) -> Result<IndexSeries> {
        Ok(self.series(&[
            ("2024-03-31", dec!(287.9)),
            ("2024-04-30", dec!(289.4)),
            ("2024-05-31", dec!(276.4)),
        ]))
    }

    async fn uva_index(&self) -> Result<IndexSeries> {
        Ok(self.series(&[
            ("2024-06-12", dec!(1019.57)),
            ("2024-06-13", dec!(1020.98)),
            ("2024-06-14", dec!(1022.39)),
        ]))
    }

    fn name(&self) -> &str {
        "MockData"
    }
}
