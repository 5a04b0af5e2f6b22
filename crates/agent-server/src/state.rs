//! Application State

use std::sync::Arc;

use agent_core::{LlmProvider, Orchestrator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// LLM provider (Ollama, etc.)
    pub provider: Arc<dyn LlmProvider>,
    
    /// Tool-calling orchestrator wired to the provider and the lookup tool
    pub orchestrator: Arc<Orchestrator>,
}
