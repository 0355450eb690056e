//! System prompt generation for text-based tool calling

use crate::fence::FenceSyntax;
use crate::protocol::default_protocol;
use crate::types::ToolDefinition;

const JSON_TOOL_PROMPT: &str = include_str!("../../resources/json_tool_prompt.md");

/// Append the tool section to an existing system prompt.
///
/// Without tools the existing prompt is returned untouched, so tool-less
/// requests keep byte-identical prompts.
pub fn build_json_tool_system_prompt(existing: Option<&str>, tools: &[ToolDefinition]) -> String {
    default_protocol().build_system_prompt(existing, tools)
}

pub(crate) fn render_system_prompt(
    syntax: &FenceSyntax,
    existing: Option<&str>,
    tools: &[ToolDefinition],
) -> String {
    if tools.is_empty() {
        return existing.unwrap_or_default().to_string();
    }

    // Markers first so text inside tool descriptions is never substituted
    let section = JSON_TOOL_PROMPT
        .replace("{{call_marker}}", &syntax.call_marker)
        .replace("{{result_marker}}", &syntax.result_marker)
        .replace("{{close_marker}}", &syntax.close_marker)
        .replace("{{tools}}", &generate_tool_documentation(tools));
    let section = section.trim_end();

    match existing {
        Some(prompt) if !prompt.is_empty() => format!("{prompt}\n\n{section}"),
        _ => section.to_string(),
    }
}

fn generate_tool_documentation(tools: &[ToolDefinition]) -> String {
    tools
        .iter()
        .map(|tool| {
            let mut entry = format!("### {}\n", tool.name);
            if !tool.description.is_empty() {
                entry.push_str(&tool.description);
                entry.push('\n');
            }
            entry.push_str(&format!("Parameters: {}", tool.parameters));
            entry
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
