//! One fence syntax bundled with every protocol operation

use crate::config::ConfigError;
use crate::fence::{FencePattern, FenceSyntax};
use crate::streaming::{FenceDetector, FenceStreamProcessor, FragmentSink};
use crate::tools::{formatter, parse, system_message};
use crate::types::{ParsedResponse, ToolDefinition, ToolResult};
use std::sync::{Arc, LazyLock};

static DEFAULT_PROTOCOL: LazyLock<JsonToolProtocol> = LazyLock::new(|| {
    JsonToolProtocol::new(FenceSyntax::default()).expect("default fence syntax is valid")
});

/// The protocol instance used by the crate-level functions
pub fn default_protocol() -> &'static JsonToolProtocol {
    &DEFAULT_PROTOCOL
}

#[derive(Debug, Clone)]
pub struct JsonToolProtocol {
    syntax: FenceSyntax,
    call_pattern: FencePattern,
    result_pattern: FencePattern,
}

impl JsonToolProtocol {
    pub fn new(syntax: FenceSyntax) -> Result<Self, ConfigError> {
        syntax.validate()?;
        Ok(Self {
            call_pattern: syntax.call_pattern()?,
            result_pattern: syntax.result_pattern()?,
            syntax,
        })
    }

    pub fn syntax(&self) -> &FenceSyntax {
        &self.syntax
    }

    pub fn call_pattern(&self) -> &FencePattern {
        &self.call_pattern
    }

    pub fn result_pattern(&self) -> &FencePattern {
        &self.result_pattern
    }

    pub fn build_system_prompt(&self, existing: Option<&str>, tools: &[ToolDefinition]) -> String {
        system_message::render_system_prompt(&self.syntax, existing, tools)
    }

    /// Parse a complete response. Ids are derived from `request_id` and the
    /// position of each call fence.
    pub fn parse_function_calls(&self, text: &str, request_id: u64) -> ParsedResponse {
        parse::parse_calls(&self.call_pattern, text, request_id)
    }

    pub fn parse_tool_results(&self, text: &str) -> Vec<ToolResult> {
        parse::parse_results(&self.result_pattern, text)
    }

    pub fn format_tool_results(&self, results: &[ToolResult]) -> String {
        formatter::format_results(&self.syntax, results)
    }

    /// A fresh detector for one streamed response
    pub fn fence_detector(&self) -> FenceDetector {
        FenceDetector::with_pattern(self.call_pattern.clone())
    }

    pub fn stream_processor(
        &self,
        sink: Arc<dyn FragmentSink>,
        request_id: u64,
    ) -> FenceStreamProcessor {
        FenceStreamProcessor::with_detector(sink, request_id, self.fence_detector())
    }
}

impl Default for JsonToolProtocol {
    fn default() -> Self {
        default_protocol().clone()
    }
}
