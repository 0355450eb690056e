//! Encoding of tool results into result fences

use crate::fence::FenceSyntax;
use crate::protocol::default_protocol;
use crate::types::ToolResult;
use serde_json::json;

/// Render tool results as the text of the next conversation turn
pub fn format_tool_results(results: &[ToolResult]) -> String {
    default_protocol().format_tool_results(results)
}

pub(crate) fn format_results(syntax: &FenceSyntax, results: &[ToolResult]) -> String {
    results
        .iter()
        .map(|result| format_result(syntax, result))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_result(syntax: &FenceSyntax, result: &ToolResult) -> String {
    let body = json!({
        "toolCallId": result.tool_call_id,
        "toolName": result.tool_name,
        "result": result.result,
    });
    format!(
        "{}\n{}\n{}",
        syntax.result_marker, body, syntax.close_marker
    )
}
