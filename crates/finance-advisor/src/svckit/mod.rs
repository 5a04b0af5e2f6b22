//! Service Kit - Agent Tools
//!
//! Domain-specific tools that implement `agent_core::Tool` for the finance advisor.

mod financial_lookup;

pub use financial_lookup::{FinancialLookupTool, LookupQuery, TOOL_NAME};
