// Tool classification and warnings
pub mod classify;

// Result fence encoding
pub mod formatter;

// Call and result fence parsing
pub mod parse;

// System prompt generation
pub mod system_message;

#[cfg(test)]
mod tests;

pub use classify::{
    create_unsupported_setting_warning, create_unsupported_tool_warning, is_function_tool,
    prepare_tools, PreparedTools,
};
pub use formatter::format_tool_results;
pub use parse::{parse_json_function_calls, parse_tool_results, tool_call_id};
pub use system_message::build_json_tool_system_prompt;
