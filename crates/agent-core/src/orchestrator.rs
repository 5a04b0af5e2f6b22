//! Tool-Call Orchestrator
//!
//! Two-phase flow around a single data-lookup tool:
//!
//! ```text
//! BUILD_PROMPT ─▶ AWAIT_MODEL ─┬─▶ DONE            (context injected / plain answer)
//!                              └─▶ DISPATCH_DATA ─▶ AWAIT_FINAL_MODEL ─▶ DONE
//! ```
//!
//! Tools are offered only when the caller did not inject data. At most one
//! tool invocation is honored per turn and there is never a third
//! round-trip. Every failure ends the turn with a fixed user-facing string;
//! [`Orchestrator::run`] exposes the typed outcome underneath.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{AgentError, Result};
use crate::message::{ConversationHistory, Message};
use crate::prompt::{DEFAULT_HISTORY_WINDOW, DEFAULT_SYSTEM_PROMPT, PromptBuilder};
use crate::provider::{ChatRequest, LlmProvider};
use crate::tool::{Tool, ToolCall};

/// Returned when the first round-trip fails
pub const TRANSPORT_WARNING: &str = "⚠️ Error communicating with the model.";

/// Returned when the first response carries no message object
pub const NO_MESSAGE_WARNING: &str = "⚠️ Could not generate a response right now.";

/// Returned when a direct answer has no content
pub const NO_INFORMATION: &str = "No information available for that query.";

/// Returned when the tool-result round-trip fails
pub const FINAL_TRANSPORT_WARNING: &str = "⚠️ Error generating the final response.";

/// Returned when the final answer has no content
pub const NO_FINAL_RESPONSE: &str = "Could not generate a final response.";

/// Sent to the model in place of data when the tool itself failed
pub const TOOL_FAILURE_PLACEHOLDER: &str = "The requested data could not be retrieved.";

/// Orchestrator configuration
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Anti-fabrication system instruction
    pub system_prompt: String,

    /// History entries carried into each request
    pub history_window: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

/// How a turn ended, before it is rendered for the caller
#[derive(Debug)]
pub enum TurnOutcome {
    /// Single round-trip; `None` when the model sent no content
    Answered(Option<String>),

    /// Two round-trips through the data tool
    Resolved {
        call: ToolCall,
        /// Exact tool message content sent back to the model
        data: String,
        answer: Option<String>,
    },

    /// First response had no message object
    NoMessage,

    /// First round-trip failed; the tool was never reached
    TransportFailed(AgentError),

    /// Tool-result round-trip failed
    FinalTransportFailed { call: ToolCall, error: AgentError },
}

impl TurnOutcome {
    /// Render the caller-facing string
    pub fn into_reply(self) -> String {
        match self {
            Self::Answered(content) => content.unwrap_or_else(|| NO_INFORMATION.into()),
            Self::Resolved { answer, .. } => answer.unwrap_or_else(|| NO_FINAL_RESPONSE.into()),
            Self::NoMessage => NO_MESSAGE_WARNING.into(),
            Self::TransportFailed(_) => TRANSPORT_WARNING.into(),
            Self::FinalTransportFailed { .. } => FINAL_TRANSPORT_WARNING.into(),
        }
    }

    /// Whether the data tool was invoked during this turn
    pub const fn used_tool(&self) -> bool {
        matches!(self, Self::Resolved { .. } | Self::FinalTransportFailed { .. })
    }
}

/// Mediates between the caller, the model and the data tool
pub struct Orchestrator {
    provider: Arc<dyn LlmProvider>,
    tool: Arc<dyn Tool>,
    prompts: PromptBuilder,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(provider: Arc<dyn LlmProvider>, tool: Arc<dyn Tool>, config: OrchestratorConfig) -> Self {
        Self {
            provider,
            tool,
            prompts: PromptBuilder::new(config.system_prompt, config.history_window),
        }
    }

    /// Create with default configuration
    pub fn with_defaults(provider: Arc<dyn LlmProvider>, tool: Arc<dyn Tool>) -> Self {
        Self::new(provider, tool, OrchestratorConfig::default())
    }

    /// Answer one user message. Never fails: every error path is rendered
    /// as a fixed human-readable string.
    pub async fn respond(
        &self,
        message: &str,
        history: &ConversationHistory,
        context: Option<&Value>,
    ) -> String {
        self.run(message, history, context).await.into_reply()
    }

    /// Run one turn and report how it ended
    pub async fn run(
        &self,
        message: &str,
        history: &ConversationHistory,
        context: Option<&Value>,
    ) -> TurnOutcome {
        let request = self.initial_request(message, history, context);

        tracing::debug!(
            messages = request.messages.len(),
            tools = request.tools.is_some(),
            "Awaiting model"
        );
        let response = match self.provider.chat(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Model request failed");
                return TurnOutcome::TransportFailed(e);
            }
        };

        let Some(reply) = response.message else {
            tracing::warn!("Model response carried no message");
            return TurnOutcome::NoMessage;
        };

        // Injected data means the model must answer from it, whatever it asked for
        if context.is_some() {
            return TurnOutcome::Answered(reply.content);
        }

        let Some(raw) = reply.first_tool_call().cloned() else {
            return TurnOutcome::Answered(reply.content);
        };

        if reply.tool_calls.len() > 1 {
            tracing::debug!(
                requested = reply.tool_calls.len(),
                "Honoring only the first tool call"
            );
        }

        let call = ToolCall::from_raw(&raw);
        tracing::debug!(tool = %call.name, id = %call.id, "Dispatching data lookup");
        let data = self.dispatch(&call).await;

        let mut messages = request.messages;
        messages.push(reply.to_assistant_turn(&call));
        messages.push(Message::tool(data.clone(), call.id.clone()));

        match self.provider.chat(&ChatRequest::new(messages)).await {
            Ok(final_response) => TurnOutcome::Resolved {
                call,
                data,
                answer: final_response.message.and_then(|m| m.content),
            },
            Err(error) => {
                tracing::warn!(error = %error, "Final model request failed");
                TurnOutcome::FinalTransportFailed { call, error }
            }
        }
    }

    /// First request of a turn: tools are attached only without injected data
    fn initial_request(
        &self,
        message: &str,
        history: &ConversationHistory,
        context: Option<&Value>,
    ) -> ChatRequest {
        let request = ChatRequest::new(self.prompts.build(message, history, context));

        if context.is_some() {
            request
        } else {
            request.with_tools(vec![self.tool.schema().to_definition()])
        }
    }

    /// Execute the tool, degrading a failure to a placeholder payload
    async fn dispatch(&self, call: &ToolCall) -> String {
        match self.tool.execute(call).await {
            Ok(result) => result.payload(),
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "Data lookup failed");
                Value::from(vec![TOOL_FAILURE_PLACEHOLDER]).to_string()
            }
        }
    }

    /// Get the prompt builder
    pub const fn prompts(&self) -> &PromptBuilder {
        &self.prompts
    }
}

/// Builder for Orchestrator configuration
pub struct OrchestratorBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tool: Option<Arc<dyn Tool>>,
    config: OrchestratorConfig,
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tool: None,
            config: OrchestratorConfig::default(),
        }
    }

    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    #[must_use]
    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tool = Some(tool);
        self
    }

    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    #[must_use]
    pub const fn history_window(mut self, window: usize) -> Self {
        self.config.history_window = window;
        self
    }

    pub fn build(self) -> Result<Orchestrator> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;
        let tool = self
            .tool
            .ok_or_else(|| AgentError::Config("Data tool is required".into()))?;

        Ok(Orchestrator::new(provider, tool, self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;
    use crate::provider::ChatResponse;
    use crate::tool::{ParameterSchema, RawFunction, RawToolCall, ToolResult, ToolSchema};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays canned responses and records every request
    #[derive(Default)]
    struct ScriptedProvider {
        replies: Mutex<VecDeque<Result<ChatResponse>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedProvider {
        fn new(replies: Vec<Result<ChatResponse>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::default(),
            })
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "test-model"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AgentError::Provider("script exhausted".into())))
        }
    }

    /// Returns fixed data and counts invocations
    struct CountingTool {
        calls: AtomicUsize,
        data: Option<Value>,
    }

    impl CountingTool {
        fn returning(data: Value) -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), data: Some(data) })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), data: None })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Tool for CountingTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "lookup_financial_data".into(),
                description: "Look up financial data".into(),
                parameters: vec![
                    ParameterSchema::string("query", "What to look up", true),
                    ParameterSchema::string("date", "YYYY-MM-DD", false),
                ],
            }
        }

        async fn execute(&self, _call: &ToolCall) -> Result<ToolResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.data {
                Some(data) => Ok(ToolResult::success("lookup_financial_data", "ok").with_data(data.clone())),
                None => Err(AgentError::ToolExecution("provider down".into())),
            }
        }
    }

    fn lookup_call(id: &str, arguments: Value) -> RawToolCall {
        RawToolCall {
            id: Some(id.into()),
            function: RawFunction { name: "lookup_financial_data".into(), arguments },
        }
    }

    fn orchestrator(provider: &Arc<ScriptedProvider>, tool: &Arc<CountingTool>) -> Orchestrator {
        let provider: Arc<dyn LlmProvider> = provider.clone();
        let tool: Arc<dyn Tool> = tool.clone();
        Orchestrator::with_defaults(provider, tool)
    }

    #[tokio::test]
    async fn test_direct_answer_skips_tool() {
        let provider = ScriptedProvider::new(vec![Ok(ChatResponse::text("¡Hola!"))]);
        let tool = CountingTool::returning(json!(["unused"]));

        let reply = orchestrator(&provider, &tool)
            .respond("hola", &ConversationHistory::new(), None)
            .await;

        assert_eq!(reply, "¡Hola!");
        assert_eq!(tool.calls(), 0);

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let tools = requests[0].tools.as_ref().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].function.name, "lookup_financial_data");
    }

    #[tokio::test]
    async fn test_injected_context_never_offers_or_runs_tools() {
        // Even if the model asks for a tool, injected data wins
        let mut response = ChatResponse::tool_call(lookup_call("c1", json!({"query": "btc"})));
        response.message.as_mut().unwrap().content = Some("El dólar cotiza a 1200.".into());
        let provider = ScriptedProvider::new(vec![Ok(response)]);
        let tool = CountingTool::returning(json!(["unused"]));
        let context = json!({"dolar": 1200});

        let outcome = orchestrator(&provider, &tool)
            .run("¿dólar?", &ConversationHistory::new(), Some(&context))
            .await;

        assert!(!outcome.used_tool());
        assert_eq!(outcome.into_reply(), "El dólar cotiza a 1200.");
        assert_eq!(tool.calls(), 0);

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].tools.is_none());
        assert_eq!(requests[0].messages[1].role, Role::System);
        assert!(requests[0].messages[1].content.contains("{\"dolar\":1200}"));
    }

    #[tokio::test]
    async fn test_tool_round_trip() {
        let provider = ScriptedProvider::new(vec![
            Ok(ChatResponse::tool_call(lookup_call("call_7", json!({"query": "bitcoin"})))),
            Ok(ChatResponse::text("Bitcoin cotiza a 65000 dólares.")),
        ]);
        let tool = CountingTool::returning(json!(["BTC: $65000"]));

        let reply = orchestrator(&provider, &tool)
            .respond("precio del bitcoin", &ConversationHistory::new(), None)
            .await;

        assert_eq!(reply, "Bitcoin cotiza a 65000 dólares.");
        assert_eq!(tool.calls(), 1);

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);

        let first = &requests[0].messages;
        let second = &requests[1].messages;
        assert_eq!(&second[..first.len()], first.as_slice());
        assert_eq!(second.len(), first.len() + 2);

        let assistant = &second[first.len()];
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.tool_calls.len(), 1);

        let tool_msg = second.last().unwrap();
        assert_eq!(tool_msg.role, Role::Tool);
        assert_eq!(tool_msg.content, r#"["BTC: $65000"]"#);
        assert_eq!(tool_msg.tool_call_id.as_deref(), Some("call_7"));

        // no third round-trip is possible
        assert!(requests[1].tools.is_none());
    }

    #[tokio::test]
    async fn test_replayed_call_matches_tool_message() {
        let untagged = RawToolCall {
            id: None,
            function: RawFunction {
                name: "lookup_financial_data".into(),
                arguments: json!(r#"{"query": "bitcoin"}"#),
            },
        };
        let provider = ScriptedProvider::new(vec![
            Ok(ChatResponse::tool_call(untagged)),
            Ok(ChatResponse::text("listo")),
        ]);
        let tool = CountingTool::returning(json!(["BTC: $65000"]));

        orchestrator(&provider, &tool)
            .respond("precio del bitcoin", &ConversationHistory::new(), None)
            .await;

        let second = &provider.requests()[1].messages;
        let assistant = &second[second.len() - 2];
        let tool_msg = &second[second.len() - 1];

        let replayed = &assistant.tool_calls[0];
        assert!(replayed.id.as_deref().is_some_and(|id| id.starts_with("call_")));
        assert_eq!(replayed.id, tool_msg.tool_call_id);
        assert_eq!(replayed.function.arguments, json!({"query": "bitcoin"}));

        let wire = serde_json::to_value(assistant).unwrap();
        assert!(wire["tool_calls"][0]["function"]["arguments"].is_object());
    }

    #[tokio::test]
    async fn test_only_first_tool_call_honored() {
        let mut response = ChatResponse::tool_call(lookup_call("first", json!({"query": "btc"})));
        response
            .message
            .as_mut()
            .unwrap()
            .tool_calls
            .push(lookup_call("second", json!({"query": "usd"})));
        let provider = ScriptedProvider::new(vec![Ok(response), Ok(ChatResponse::text("done"))]);
        let tool = CountingTool::returning(json!([]));

        let outcome = orchestrator(&provider, &tool)
            .run("btc y dólar", &ConversationHistory::new(), None)
            .await;

        assert_eq!(tool.calls(), 1);
        match outcome {
            TurnOutcome::Resolved { call, data, .. } => {
                assert_eq!(call.id, "first");
                assert_eq!(data, "[]");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let requests = provider.requests();
        let assistant = &requests[1].messages[requests[1].messages.len() - 2];
        assert_eq!(assistant.tool_calls.len(), 1);
        assert_eq!(assistant.tool_calls[0].id.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_first_transport_failure() {
        let provider = ScriptedProvider::new(vec![Err(AgentError::Timeout(60))]);
        let tool = CountingTool::returning(json!(["unused"]));
        let orch = orchestrator(&provider, &tool);

        let outcome = orch.run("precio del bitcoin", &ConversationHistory::new(), None).await;
        assert!(matches!(outcome, TurnOutcome::TransportFailed(AgentError::Timeout(60))));
        assert_eq!(outcome.into_reply(), TRANSPORT_WARNING);
        assert_eq!(tool.calls(), 0);
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_final_transport_failure() {
        let provider = ScriptedProvider::new(vec![
            Ok(ChatResponse::tool_call(lookup_call("c1", json!({"query": "uva"})))),
            Err(AgentError::HttpStatus { status: 500, body: "boom".into() }),
        ]);
        let tool = CountingTool::returning(json!([1.5]));

        let reply = orchestrator(&provider, &tool)
            .respond("índice uva", &ConversationHistory::new(), None)
            .await;

        assert_eq!(reply, FINAL_TRANSPORT_WARNING);
        assert_eq!(tool.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_content_fallbacks() {
        let empty_direct = ChatResponse {
            message: Some(crate::provider::ResponseMessage::default()),
            model: None,
        };
        let provider = ScriptedProvider::new(vec![Ok(empty_direct)]);
        let tool = CountingTool::returning(json!([]));
        let reply = orchestrator(&provider, &tool)
            .respond("hola", &ConversationHistory::new(), None)
            .await;
        assert_eq!(reply, NO_INFORMATION);

        let provider = ScriptedProvider::new(vec![
            Ok(ChatResponse::tool_call(lookup_call("c1", json!({})))),
            Ok(ChatResponse::default()),
        ]);
        let reply = orchestrator(&provider, &tool)
            .respond("algo", &ConversationHistory::new(), None)
            .await;
        assert_eq!(reply, NO_FINAL_RESPONSE);

        let provider = ScriptedProvider::new(vec![Ok(ChatResponse::default())]);
        let reply = orchestrator(&provider, &tool)
            .respond("hola", &ConversationHistory::new(), None)
            .await;
        assert_eq!(reply, NO_MESSAGE_WARNING);
    }

    #[tokio::test]
    async fn test_tool_failure_sends_placeholder() {
        let provider = ScriptedProvider::new(vec![
            Ok(ChatResponse::tool_call(lookup_call("c1", json!({"query": "riesgo"})))),
            Ok(ChatResponse::text("No tengo ese dato.")),
        ]);
        let tool = CountingTool::failing();

        let reply = orchestrator(&provider, &tool)
            .respond("riesgo país", &ConversationHistory::new(), None)
            .await;

        assert_eq!(reply, "No tengo ese dato.");
        let requests = provider.requests();
        let tool_msg = requests[1].messages.last().unwrap();
        assert_eq!(tool_msg.content, format!("[\"{TOOL_FAILURE_PLACEHOLDER}\"]"));
    }

    #[tokio::test]
    async fn test_long_history_is_windowed() {
        let history: ConversationHistory =
            (0..14).map(|i| Message::user(format!("m{i}"))).collect();
        let provider = ScriptedProvider::new(vec![Ok(ChatResponse::text("ok"))]);
        let tool = CountingTool::returning(json!([]));

        orchestrator(&provider, &tool).respond("now", &history, None).await;

        let messages = &provider.requests()[0].messages;
        assert_eq!(messages.len(), 12);
        assert_eq!(messages[1].content, "m4");
        assert_eq!(messages[10].content, "m13");
        assert_eq!(messages[11].content, "now");
    }

    #[test]
    fn test_builder_requires_parts() {
        assert!(matches!(OrchestratorBuilder::new().build(), Err(AgentError::Config(_))));

        let provider: Arc<dyn LlmProvider> = ScriptedProvider::new(vec![]);
        let tool: Arc<dyn Tool> = CountingTool::returning(json!([]));
        let orch = OrchestratorBuilder::new()
            .provider(provider)
            .tool(tool)
            .system_prompt("rules")
            .history_window(4)
            .build()
            .unwrap();
        assert_eq!(orch.prompts().system_prompt(), "rules");
    }
}
