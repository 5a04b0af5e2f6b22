//! Prompt construction.
//!
//! Request layout, in order:
//! 1. the fixed system instruction
//! 2. injected real data, serialized as JSON (only when supplied)
//! 3. the most recent history window
//! 4. the current user message

use serde_json::Value;

use crate::message::{ConversationHistory, Message};

/// Default number of history entries carried into a request
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Generic anti-fabrication instruction, used when no domain prompt is set
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a careful assistant.\n\
Use ONLY the data supplied by the system.\n\
Never invent values, prices or percentages.\n\
If a figure is not available, say so explicitly.\n\
Respond in clear English.";

/// Header preceding the injected data in its system message
pub const CONTEXT_HEADER: &str = "Real financial data (JSON):";

#[derive(Clone, Debug)]
pub struct PromptBuilder {
    system_prompt: String,
    history_window: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT, DEFAULT_HISTORY_WINDOW)
    }
}

impl PromptBuilder {
    pub fn new(system_prompt: impl Into<String>, history_window: usize) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            history_window,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Assemble the ordered message sequence for one request
    pub fn build(
        &self,
        message: &str,
        history: &ConversationHistory,
        context: Option<&Value>,
    ) -> Vec<Message> {
        let recent = history.recent(self.history_window);
        let mut messages = Vec::with_capacity(recent.len() + 3);

        messages.push(Message::system(self.system_prompt.clone()));

        if let Some(data) = context {
            messages.push(Message::system(format!("{CONTEXT_HEADER}\n{data}")));
        }

        messages.extend_from_slice(recent);
        messages.push(Message::user(message));
        messages
    }
}
