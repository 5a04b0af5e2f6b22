//! Financial Lookup Tool
//!
//! The single function offered to the model. Turns its arguments into a
//! classified topic and a normalized date, then fetches through the
//! [`DataDispatcher`].

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    AgentError, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
    tool::ParameterSchema,
};

use crate::classifier::{FinancialTopic, classify};
use crate::date::normalize_date;
use crate::dispatcher::DataDispatcher;
use crate::provider::FinancialDataProvider;

/// Function name advertised to the model
pub const TOOL_NAME: &str = "lookup_financial_data";

/// Accepted names for the query argument
const QUERY_KEYS: &[&str] = &["query", "consulta"];

/// Accepted names for the date argument
const DATE_KEYS: &[&str] = &["date", "fecha"];

/// Tool arguments after normalization
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupQuery {
    /// Lowercased free text; empty when the model sent none
    pub query: String,
    /// Canonical `YYYY-MM-DD`, or `None` if absent or unparseable
    pub date: Option<String>,
}

impl LookupQuery {
    pub fn from_call(call: &ToolCall) -> Self {
        let raw_date = call.str_arg(DATE_KEYS);
        let date = normalize_date(raw_date);
        if date.is_none() && raw_date.is_some_and(|d| !d.trim().is_empty()) {
            tracing::debug!(date = ?raw_date, "Ignoring unparseable date argument");
        }

        Self {
            query: call.str_arg(QUERY_KEYS).unwrap_or_default().to_lowercase(),
            date,
        }
    }

    pub fn topic(&self) -> FinancialTopic {
        classify(&self.query)
    }
}

/// Tool for looking up financial data
pub struct FinancialLookupTool {
    dispatcher: DataDispatcher,
}

impl FinancialLookupTool {
    pub fn new(provider: Arc<dyn FinancialDataProvider>) -> Self {
        Self {
            dispatcher: DataDispatcher::new(provider),
        }
    }
}

#[async_trait]
impl Tool for FinancialLookupTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: TOOL_NAME.into(),
            description: "Returns current or historical financial data: top cryptocurrencies, top stocks, dollar quotes, country risk, inflation, year-over-year inflation and the UVA index.".into(),
            parameters: vec![
                ParameterSchema::string(
                    "query",
                    "What to look up, in plain words (e.g. 'bitcoin', 'dólar blue', 'riesgo país')",
                    true,
                ),
                ParameterSchema::string(
                    "date",
                    "Optional calendar date in YYYY-MM-DD format for historical values",
                    false,
                ),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let lookup_query = LookupQuery::from_call(call);
        let topic = lookup_query.topic();
        tracing::debug!(query = %lookup_query.query, %topic, "Classified lookup");

        let lookup = self
            .dispatcher
            .dispatch(topic, lookup_query.date.as_deref())
            .await
            .map_err(|e| AgentError::ToolExecution(e.to_string()))?;

        let found = lookup.is_found();
        let values = lookup.into_values();
        let output = format!("{topic}: {} value(s)", values.len());

        let result = if found {
            ToolResult::success(TOOL_NAME, output)
        } else {
            ToolResult::failure(TOOL_NAME, output)
        };

        Ok(result.with_data(serde_json::to_value(&values)?))
    }
}
