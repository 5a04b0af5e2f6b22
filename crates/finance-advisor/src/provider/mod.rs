//! Data Provider Integration
//!
//! Collaborator seam for the sources behind each financial topic.

mod mock;

pub use mock::MockDataProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{HistoricalSeries, IndexSeries};

/// Financial data source (Strategy pattern)
///
/// Implementations are expected to degrade gracefully: an empty list or
/// `None` means "no data", an `Err` means the source itself failed.
#[async_trait]
pub trait FinancialDataProvider: Send + Sync {
    /// Top five cryptocurrencies, one formatted line each
    async fn top_cryptos(&self) -> Result<Vec<String>>;

    /// Top five equities, one formatted line each
    async fn top_stocks(&self) -> Result<Vec<String>>;

    /// Currency quotes, one formatted line each
    async fn fx_quotes(&self) -> Result<Vec<String>>;

    /// Current country-risk reading as a formatted record
    async fn country_risk(&self) -> Result<Option<String>>;

    /// Daily country-risk history
    async fn country_risk_history(&self) -> Result<HistoricalSeries>;

    /// Monthly inflation index
    async fn inflation_index(&self) -> Result<IndexSeries>;

    /// Year-over-year inflation index
    async fn inflation_yoy_index(&self) -> Result<IndexSeries>;

    /// UVA (inflation-adjusted unit) index
    async fn uva_index(&self) -> Result<IndexSeries>;

    /// Provider name
    fn name(&self) -> &str;
}
