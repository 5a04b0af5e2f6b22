//! # agent-core
//!
//! Orchestration core that keeps a local LLM from fabricating financial
//! figures: the model either answers from data the caller injected, or asks
//! for one lookup through a function call whose result is fed back for the
//! final wording.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Orchestrator                           │
//! │  ┌───────────────┐  ┌──────────────┐  ┌───────────────────┐  │
//! │  │ PromptBuilder │  │  Tool (data  │  │   LlmProvider     │  │
//! │  │               │──│   lookup)    │──│   (Strategy)      │  │
//! │  └───────────────┘  └──────────────┘  └───────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait carries the endpoint configuration, so tests and
//! alternative backends plug in without touching the orchestration logic.

pub mod error;
pub mod message;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod tool;

pub use error::{AgentError, Result};
pub use message::{ConversationHistory, Message, Role};
pub use orchestrator::{Orchestrator, OrchestratorBuilder, OrchestratorConfig, TurnOutcome};
pub use prompt::PromptBuilder;
pub use provider::{ChatRequest, ChatResponse, LlmProvider};
pub use tool::{RawToolCall, Tool, ToolCall, ToolResult, ToolSchema};
