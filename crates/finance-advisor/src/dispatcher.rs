//! Data Dispatcher
//!
//! Routes a classified topic (plus an optional normalized date) to exactly
//! one provider call. Provider errors propagate untouched; "nothing to
//! report" outcomes are explicit [`DataLookup`] variants and only become
//! placeholder strings through [`DataLookup::into_values`].

use std::sync::Arc;

use crate::classifier::FinancialTopic;
use crate::error::Result;
use crate::model::{DataResult, DataValue, IndexSeries};
use crate::provider::FinancialDataProvider;

/// Placeholder when the provider has no current value
pub const NO_DATA_AVAILABLE: &str = "No data available.";

/// Placeholder when the history has no entry for the requested date
pub const NO_DATA_FOR_DATE: &str = "No data for that date.";

/// Placeholder for queries outside every known topic
pub const UNRECOGNIZED_QUERY: &str = "Did not understand which financial data was requested.";

/// Outcome of a dispatch
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataLookup {
    /// Provider data, possibly empty
    Found(DataResult),
    /// Provider had no current value
    Unavailable,
    /// History has no entry for this date
    DateNotFound(String),
    /// Query matched no topic
    Unrecognized,
}

impl DataLookup {
    /// Result payload with placeholders substituted
    pub fn into_values(self) -> DataResult {
        match self {
            Self::Found(values) => values,
            Self::Unavailable => vec![NO_DATA_AVAILABLE.into()],
            Self::DateNotFound(_) => vec![NO_DATA_FOR_DATE.into()],
            Self::Unrecognized => vec![UNRECOGNIZED_QUERY.into()],
        }
    }

    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Maps topics to provider calls
#[derive(Clone)]
pub struct DataDispatcher {
    provider: Arc<dyn FinancialDataProvider>,
}

impl DataDispatcher {
    pub fn new(provider: Arc<dyn FinancialDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn FinancialDataProvider {
        self.provider.as_ref()
    }

    /// Fetch the data for `topic`. A date turns a country-risk lookup into
    /// a historical one; other topics ignore it.
    pub async fn dispatch(&self, topic: FinancialTopic, date: Option<&str>) -> Result<DataLookup> {
        let topic = topic.with_date(date);
        tracing::debug!(%topic, date = ?date, provider = self.provider.name(), "Dispatching");

        let lookup = match topic {
            FinancialTopic::CryptoTop5 => found(self.provider.top_cryptos().await?),
            FinancialTopic::StocksTop5 => found(self.provider.top_stocks().await?),
            FinancialTopic::FxRates => found(self.provider.fx_quotes().await?),
            FinancialTopic::CountryRisk => match self.provider.country_risk().await? {
                Some(record) => DataLookup::Found(vec![record.into()]),
                None => DataLookup::Unavailable,
            },
            FinancialTopic::CountryRiskHistorical => {
                let Some(date) = date else {
                    return Ok(DataLookup::Unavailable);
                };
                let history = self.provider.country_risk_history().await?;
                match history.value_on(date) {
                    Some(value) => DataLookup::Found(vec![
                        format!("Country Risk {date}: {value} points").into(),
                    ]),
                    None => DataLookup::DateNotFound(date.to_string()),
                }
            }
            FinancialTopic::Inflation => latest(self.provider.inflation_index().await?),
            FinancialTopic::InflationYoy => latest(self.provider.inflation_yoy_index().await?),
            FinancialTopic::UvaIndex => latest(self.provider.uva_index().await?),
            FinancialTopic::Unrecognized => DataLookup::Unrecognized,
        };

        Ok(lookup)
    }
}

fn found(lines: Vec<String>) -> DataLookup {
    DataLookup::Found(lines.into_iter().map(DataValue::Text).collect())
}

fn latest(series: IndexSeries) -> DataLookup {
    series
        .latest
        .map_or(DataLookup::Unavailable, |value| DataLookup::Found(vec![value.into()]))
}
