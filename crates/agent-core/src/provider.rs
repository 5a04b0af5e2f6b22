//! LLM Provider Strategy Pattern
//!
//! Defines the chat-completion seam the orchestrator talks through. The
//! endpoint, model and timeout belong to the implementation's configuration,
//! so tests can swap in a scripted provider.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_core::provider::{ChatRequest, LlmProvider};
//!
//! let provider = OllamaProvider::from_config(config);
//! let response = provider.chat(&ChatRequest::new(messages)).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;
use crate::tool::{RawToolCall, ToolCall, ToolDefinition};

/// One chat-completion request
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Ordered prompt: instructions, context, history, current turn
    pub messages: Vec<Message>,

    /// Function definitions offered to the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

impl ChatRequest {
    pub const fn new(messages: Vec<Message>) -> Self {
        Self { messages, tools: None }
    }

    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }
}

/// Parsed chat-completion response body
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChatResponse {
    /// Absent when the endpoint answered without a message object
    #[serde(default)]
    pub message: Option<ResponseMessage>,

    #[serde(default)]
    pub model: Option<String>,
}

impl ChatResponse {
    /// Convenience for a plain text reply
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            message: Some(ResponseMessage {
                content: Some(content.into()),
                tool_calls: Vec::new(),
            }),
            model: None,
        }
    }

    /// Convenience for a reply that requests a single tool call
    pub fn tool_call(call: RawToolCall) -> Self {
        Self {
            message: Some(ResponseMessage {
                content: Some(String::new()),
                tool_calls: vec![call],
            }),
            model: None,
        }
    }
}

/// The model's message inside a response
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub tool_calls: Vec<RawToolCall>,
}

impl ResponseMessage {
    /// The first requested invocation; later ones are ignored
    pub fn first_tool_call(&self) -> Option<&RawToolCall> {
        self.tool_calls.first()
    }

    /// Assistant turn to replay ahead of a tool result, carrying only the
    /// invocation that is actually answered, in its validated form.
    pub fn to_assistant_turn(&self, honored: &ToolCall) -> Message {
        Message::assistant(self.content.clone().unwrap_or_default())
            .with_tool_calls(vec![honored.to_raw()])
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<RawToolCall>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<RawToolCall>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new LLM backends.
/// The orchestrator works exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "Ollama")
    fn name(&self) -> &str;

    /// Model identifier requests are sent with
    fn model(&self) -> &str;

    /// Check if the provider is available and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Perform one non-streaming chat round-trip
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;
}
