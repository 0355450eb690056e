//! Text-based tool calling for models without native function calling.
//!
//! Tools are described in the system prompt, the model answers with fenced
//! JSON blocks, and tool results go back to it in fenced blocks as well:
//!
//! ```
//! use fenced_tools::{build_json_tool_system_prompt, parse_json_function_calls, ToolDefinition};
//! use serde_json::json;
//!
//! let tools = vec![ToolDefinition {
//!     name: "get_weather".to_string(),
//!     description: "Current weather for a city".to_string(),
//!     parameters: json!({"type": "object", "properties": {"city": {"type": "string"}}}),
//! }];
//! let prompt = build_json_tool_system_prompt(Some("You are a helpful assistant."), &tools);
//! assert!(prompt.contains("### get_weather"));
//!
//! let response = "Let me check.\n```tool_call\n{\"name\": \"get_weather\", \"arguments\": {\"city\": \"Oslo\"}}\n```";
//! let parsed = parse_json_function_calls(response);
//! assert_eq!(parsed.tool_calls[0].tool_name, "get_weather");
//! assert_eq!(parsed.text_content, "Let me check.");
//! ```

pub mod config;
pub mod fence;
pub mod logging;
pub mod protocol;
pub mod streaming;
pub mod tools;
pub mod types;


pub use config::{ConfigError, ProtocolConfig};
pub use fence::{FencePattern, FenceSpan, FenceSyntax};
pub use protocol::{default_protocol, JsonToolProtocol};
pub use streaming::{
    DisplayFragment, FenceDetection, FenceDetector, FenceState, FenceStreamProcessor,
    FragmentSink, StreamError, StreamingChunk,
};
pub use tools::{
    build_json_tool_system_prompt, create_unsupported_setting_warning,
    create_unsupported_tool_warning, format_tool_results, is_function_tool,
    parse_json_function_calls, parse_tool_results, prepare_tools, PreparedTools,
};
pub use types::{
    ParsedResponse, ParsedToolCall, Tool, ToolChoice, ToolDefinition, ToolResult, Warning,
};
