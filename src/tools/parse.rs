use crate::fence::FencePattern;
use crate::protocol::default_protocol;
use crate::types::{ParsedResponse, ParsedToolCall, ToolResult};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Request id used by [`parse_json_function_calls`]
pub const DEFAULT_REQUEST_ID: u64 = 1;

/// Body of a call fence
#[derive(Deserialize)]
struct CallBody {
    name: String,
    #[serde(default = "empty_arguments")]
    arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(Default::default())
}

/// Id of the `position`-th (1-based) call fence of a request
pub fn tool_call_id(request_id: u64, position: usize) -> String {
    format!("tool-{request_id}-{position}")
}

/// Decode one call fence body. `None` means the block is not a valid call
/// and has to stay in the text.
pub(crate) fn decode_tool_call(body: &str, tool_call_id: String) -> Option<ParsedToolCall> {
    let call: CallBody = match serde_json::from_str(body) {
        Ok(call) => call,
        Err(e) => {
            warn!("Keeping malformed tool call block as text: {}", e);
            return None;
        }
    };

    if !call.arguments.is_object() {
        warn!(
            "Keeping tool call block for '{}' as text: arguments are not an object",
            call.name
        );
        return None;
    }

    debug!("Parsed tool call {} ({})", call.name, tool_call_id);
    Some(ParsedToolCall {
        tool_call_id,
        tool_name: call.name,
        args: call.arguments,
    })
}

/// Parse a complete model response into tool calls and remaining prose
pub fn parse_json_function_calls(text: &str) -> ParsedResponse {
    default_protocol().parse_function_calls(text, DEFAULT_REQUEST_ID)
}

pub(crate) fn parse_calls(pattern: &FencePattern, text: &str, request_id: u64) -> ParsedResponse {
    trace!("Parsing response for tool calls:\n{}", text);

    let mut tool_calls = Vec::new();
    let mut text_content = String::with_capacity(text.len());
    let mut copied_until = 0;
    let mut found_fence = false;

    for (index, span) in pattern.spans(text).enumerate() {
        found_fence = true;
        let id = tool_call_id(request_id, index + 1);
        if let Some(call) = decode_tool_call(span.body(text), id) {
            text_content.push_str(&text[copied_until..span.start]);
            copied_until = span.end;
            tool_calls.push(call);
        }
    }

    if !found_fence {
        return ParsedResponse {
            tool_calls,
            text_content: text.to_string(),
        };
    }

    text_content.push_str(&text[copied_until..]);
    ParsedResponse {
        tool_calls,
        text_content: text_content.trim().to_string(),
    }
}

/// Read tool results back out of conversation text
pub fn parse_tool_results(text: &str) -> Vec<ToolResult> {
    default_protocol().parse_tool_results(text)
}

pub(crate) fn parse_results(pattern: &FencePattern, text: &str) -> Vec<ToolResult> {
    pattern
        .spans(text)
        .filter_map(|span| match serde_json::from_str(span.body(text)) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Skipping malformed tool result block: {}", e);
                None
            }
        })
        .collect()
}
