use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool offered to the model, as rendered into the system prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// A tool as handed in by the caller.
///
/// Only function tools can be described to the model through the prompt.
/// Provider tools are executed by a hosting service and have no text
/// representation in this protocol, so they end up as warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Tool {
    Function {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(rename = "inputSchema")]
        input_schema: Value,
    },
    Provider {
        name: String,
        id: String,
        #[serde(default)]
        args: Value,
    },
}

impl Tool {
    pub fn name(&self) -> &str {
        match self {
            Tool::Function { name, .. } => name,
            Tool::Provider { name, .. } => name,
        }
    }
}

/// How the caller wants the model to pick tools
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolChoice {
    #[default]
    Auto,
    None,
    Required,
    Tool {
        #[serde(rename = "toolName")]
        tool_name: String,
    },
}

/// A tool invocation recovered from model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedToolCall {
    pub tool_call_id: String,
    pub tool_name: String,
    /// Always a JSON object
    pub args: Value,
}

/// Outcome of executing a tool, fed back to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub tool_call_id: String,
    pub tool_name: String,
    pub result: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResponse {
    /// In order of appearance in the response
    pub tool_calls: Vec<ParsedToolCall>,
    /// Response text with every parsed call fence removed
    pub text_content: String,
}

/// Non-fatal notice about something the current configuration cannot honor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Warning {
    Unsupported { feature: String, details: String },
}

impl Warning {
    pub fn feature(&self) -> &str {
        match self {
            Warning::Unsupported { feature, .. } => feature,
        }
    }
}
