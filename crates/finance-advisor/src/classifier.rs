//! Financial Query Classifier
//!
//! Maps a free-text query to a [`FinancialTopic`] with ordered substring
//! rules. Triggers overlap across topics, so the first matching rule wins
//! and the order of [`TOPIC_RULES`] is the priority order.
//!
//! The classifier only ever yields [`FinancialTopic::CountryRisk`] for the
//! country-risk family; the historical variant is chosen by the dispatcher
//! when a valid date accompanies the query.

use serde::{Deserialize, Serialize};

/// Closed set of lookups the data tool can perform
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialTopic {
    CryptoTop5,
    StocksTop5,
    FxRates,
    CountryRisk,
    CountryRiskHistorical,
    Inflation,
    InflationYoy,
    UvaIndex,
    Unrecognized,
}

impl FinancialTopic {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CryptoTop5 => "crypto_top5",
            Self::StocksTop5 => "stocks_top5",
            Self::FxRates => "fx_rates",
            Self::CountryRisk => "country_risk",
            Self::CountryRiskHistorical => "country_risk_historical",
            Self::Inflation => "inflation",
            Self::InflationYoy => "inflation_yoy",
            Self::UvaIndex => "uva_index",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Pick the point-in-time or historical country-risk lookup depending on
    /// whether a normalized date is present. Other topics are unchanged.
    #[must_use]
    pub const fn with_date(self, date: Option<&str>) -> Self {
        match (self, date) {
            (Self::CountryRisk, Some(_)) => Self::CountryRiskHistorical,
            (Self::CountryRiskHistorical, None) => Self::CountryRisk,
            (topic, _) => topic,
        }
    }
}

impl std::fmt::Display for FinancialTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classification rule: any trigger substring selects the topic
#[derive(Clone, Copy, Debug)]
pub struct TopicRule {
    pub topic: FinancialTopic,
    pub triggers: &'static [&'static str],
}

impl TopicRule {
    /// `query` must already be lowercased
    pub fn matches(&self, query: &str) -> bool {
        self.triggers.iter().any(|t| query.contains(t))
    }
}

/// Rules in priority order
pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        topic: FinancialTopic::CryptoTop5,
        triggers: &["bitcoin", "btc", "cripto", "crypto"],
    },
    TopicRule {
        topic: FinancialTopic::StocksTop5,
        triggers: &["acción", "accion", "acciones", "cedear", "bolsa", "stock", "equity", "equities"],
    },
    TopicRule {
        topic: FinancialTopic::FxRates,
        triggers: &["dólar", "dolar", "usd", "dollar", "cotizaci"],
    },
    TopicRule {
        topic: FinancialTopic::CountryRisk,
        triggers: &["riesgo", "country risk"],
    },
    TopicRule {
        topic: FinancialTopic::Inflation,
        triggers: &["inflación", "inflacion", "ipc", "inflation"],
    },
    TopicRule {
        topic: FinancialTopic::InflationYoy,
        triggers: &["interanual", "year over year", "yoy"],
    },
    TopicRule {
        topic: FinancialTopic::UvaIndex,
        triggers: &["uva"],
    },
];

/// Classify a query; case-insensitive
pub fn classify(query: &str) -> FinancialTopic {
    let query = query.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|rule| rule.matches(&query))
        .map_or(FinancialTopic::Unrecognized, |rule| rule.topic)
}
