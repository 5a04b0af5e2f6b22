//! # finance-advisor
//!
//! Data side of the financial assistant: everything behind the single
//! `lookup_financial_data` function the model may call.
//!
//! ## Flow
//!
//! ```text
//! tool arguments ──▶ LookupQuery { query (lowercased), date (normalized) }
//!                         │
//!                         ▼
//!                    classify(query) ──▶ FinancialTopic
//!                         │
//!                         ▼
//!               DataDispatcher::dispatch(topic, date)
//!                         │
//!                         ▼
//!            FinancialDataProvider (crypto, stocks, fx,
//!            country risk, inflation, UVA)
//! ```
//!
//! Topics follow a fixed priority: crypto, stocks, currency, country risk,
//! inflation, year-over-year inflation, UVA. A date only matters for
//! country risk, where it selects the historical series.

pub mod classifier;
pub mod date;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod provider;
pub mod svckit;

pub use classifier::{FinancialTopic, classify};
pub use date::normalize_date;
pub use dispatcher::{DataDispatcher, DataLookup};
pub use error::{AdvisorError, Result};
pub use model::{DataResult, DataValue, HistoricalSeries, IndexSeries};
pub use provider::{FinancialDataProvider, MockDataProvider};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{FinancialLookupTool, TOOL_NAME};
}

/// Language answers are written in unless configured otherwise
pub const DEFAULT_LANGUAGE: &str = "Spanish";

/// Anti-fabrication system instruction for the financial assistant
pub fn financial_assistant_prompt(language: &str) -> String {
    format!(
        "You are an Argentine financial assistant.\n\
         Use ONLY the data supplied by the system.\n\
         Never invent values, prices or percentages.\n\
         If a figure is not available, say so explicitly.\n\
         Respond in clear {language}."
    )
}
