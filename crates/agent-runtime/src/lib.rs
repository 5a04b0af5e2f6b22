//! # agent-runtime
//!
//! Runtime providers for the finance-agent system.
//!
//! ## Providers
//!
//! - **Ollama** (default): local chat completions via `/api/chat`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::ollama::OllamaProvider;
//!
//! let provider = OllamaProvider::from_env()?;
//! let orchestrator = OrchestratorBuilder::new()
//!     .provider(Arc::new(provider))
//!     .tool(Arc::new(lookup_tool))
//!     .build()?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

// Re-export core types for convenience
pub use agent_core::{
    AgentError, ChatRequest, ChatResponse, ConversationHistory, LlmProvider, Message, Orchestrator,
    Result, Role, Tool,
};
