//! Streaming recognition of tool call fences

use crate::types::ParsedToolCall;
use serde::Serialize;

mod fence_detector;
mod processor;

#[cfg(test)]
mod test_utils;

pub use fence_detector::{FenceDetection, FenceDetector, FenceState};
pub use processor::FenceStreamProcessor;

/// A piece of model output as delivered by the generation stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamingChunk {
    /// Regular output text
    Text(String),
    /// Reasoning text, never searched for tool calls
    Thinking(String),
    /// The stream has ended
    StreamingComplete,
}

/// Fragments for live display of a streamed response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayFragment {
    /// Regular text outside of tool call fences
    PlainText { text: String },
    ThinkingText { text: String },
    /// A call fence has been opened but not closed yet
    ToolPending { id: String },
    /// A call fence was closed and decoded
    ToolCall(ParsedToolCall),
    /// A call fence was closed but its body is not a valid call
    MalformedTool { id: String, raw: String },
    /// The stream ended inside a call fence
    UnterminatedTool { id: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("Failed to encode fragment: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Fragment rejected: {0}")]
    Rejected(String),
}

/// Receiver of display fragments, typically a UI
pub trait FragmentSink: Send + Sync {
    fn display_fragment(&self, fragment: &DisplayFragment) -> Result<(), StreamError>;
}
