//! Tool System
//!
//! Function-calling plumbing between the model and the data side:
//! the schema advertised to the model, the raw invocation it sends back,
//! and the validated [`ToolCall`] handed to a [`Tool`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;

use crate::error::{AgentError, Result};

/// Tool invocation exactly as the model emitted it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub function: RawFunction,
}

/// Function part of a raw tool invocation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawFunction {
    pub name: String,

    /// Either a JSON-encoded string or an already structured object
    #[serde(default)]
    pub arguments: Value,
}

/// Tool call request after validation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool identifier
    pub name: String,
    
    /// Arguments as key-value pairs
    pub arguments: HashMap<String, Value>,
    
    /// Call ID used to tag the tool result
    pub id: String,
}

impl ToolCall {
    /// Validate a raw invocation.
    ///
    /// Malformed arguments degrade to an empty argument set and a missing
    /// call ID is replaced by a fresh one, so this never fails.
    pub fn from_raw(raw: &RawToolCall) -> Self {
        let arguments = normalize_arguments(&raw.function.arguments).unwrap_or_else(|e| {
            tracing::warn!(tool = %raw.function.name, error = %e, "Discarding malformed tool arguments");
            HashMap::new()
        });

        let id = raw
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("call_{}", uuid::Uuid::new_v4().simple()));

        Self {
            name: raw.function.name.clone(),
            arguments,
            id,
        }
    }

    /// Wire form of the validated call: the resolved ID and the
    /// arguments as an object, whatever shape the model sent.
    pub fn to_raw(&self) -> RawToolCall {
        RawToolCall {
            id: Some(self.id.clone()),
            function: RawFunction {
                name: self.name.clone(),
                arguments: Value::Object(
                    self.arguments
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                ),
            },
        }
    }

    /// First string argument found under any of `keys`
    pub fn str_arg(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|k| self.arguments.get(*k).and_then(Value::as_str))
    }
}

/// Collapse the string/object ambiguity of model-provided arguments.
///
/// - JSON object: taken as is
/// - string: parsed as JSON, must decode to an object
/// - null or absent: empty set
pub fn normalize_arguments(raw: &Value) -> Result<HashMap<String, Value>> {
    let object = match raw {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        Value::String(text) if text.trim().is_empty() => Map::new(),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(AgentError::Parse(format!(
                    "tool arguments must be an object, got {other}"
                )));
            }
            Err(e) => return Err(AgentError::Parse(format!("invalid tool arguments: {e}"))),
        },
        other => {
            return Err(AgentError::Parse(format!(
                "tool arguments must be an object, got {other}"
            )));
        }
    };

    Ok(object.into_iter().collect())
}

/// Result from tool execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was called
    pub name: String,
    
    /// Whether execution succeeded
    pub success: bool,
    
    /// Output (success message or error)
    pub output: String,
    
    /// Structured data (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            output: output.into(),
            data: None,
        }
    }
    
    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            output: error.into(),
            data: None,
        }
    }
    
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Content of the tool message sent back to the model: the structured
    /// data serialized as JSON when present, the plain output otherwise.
    pub fn payload(&self) -> String {
        self.data
            .as_ref()
            .map_or_else(|| self.output.clone(), Value::to_string)
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,
    
    /// JSON Schema type (string, number, boolean, object, array)
    #[serde(rename = "type")]
    pub param_type: String,
    
    /// Human-readable description
    pub description: String,
    
    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,
}

impl ParameterSchema {
    pub fn string(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            param_type: "string".into(),
            description: description.into(),
            required,
        }
    }
}

/// Tool definition schema (for LLM function calling)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,
    
    /// Human-readable description (shown to LLM)
    pub description: String,
    
    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,
}

impl ToolSchema {
    /// Render as a chat-API function definition
    pub fn to_definition(&self) -> ToolDefinition {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    json!({ "type": p.param_type, "description": p.description }),
                )
            })
            .collect();

        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        ToolDefinition {
            kind: "function".into(),
            function: FunctionDefinition {
                name: self.name.clone(),
                description: self.description.clone(),
                parameters: json!({
                    "type": "object",
                    "properties": properties,
                    "required": required,
                }),
            },
        }
    }
}

/// Function definition as sent in the `tools` field of a chat request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: String,

    pub function: FunctionDefinition,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object
    pub parameters: Value,
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema for LLM function calling
    fn schema(&self) -> ToolSchema;
    
    /// Execute the tool with given arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult>;
}
