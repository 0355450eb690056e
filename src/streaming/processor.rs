use super::{DisplayFragment, FenceDetector, FragmentSink, StreamError, StreamingChunk};
use crate::tools::parse::{decode_tool_call, tool_call_id};
use std::sync::Arc;
use tracing::debug;

/// Turns streamed model output into display fragments.
///
/// Text outside of call fences is forwarded once its line is complete, as
/// an incomplete last line may still turn into an opening marker. Tool ids follow the same numbering as the batch parser, so a UI can
/// match live fragments with the calls parsed from the final response.
pub struct FenceStreamProcessor {
    sink: Arc<dyn FragmentSink>,
    request_id: u64,
    detector: FenceDetector,
    /// Number of call fences opened so far
    tool_counter: usize,
}

impl FenceStreamProcessor {
    pub fn new(sink: Arc<dyn FragmentSink>, request_id: u64) -> Self {
        Self::with_detector(sink, request_id, FenceDetector::new())
    }

    pub fn with_detector(
        sink: Arc<dyn FragmentSink>,
        request_id: u64,
        detector: FenceDetector,
    ) -> Self {
        Self {
            sink,
            request_id,
            detector,
            tool_counter: 0,
        }
    }

    /// Process a streaming chunk and send display fragments to the sink
    pub fn process(&mut self, chunk: &StreamingChunk) -> Result<(), StreamError> {
        match chunk {
            StreamingChunk::Text(text) => {
                self.detector.add_chunk(text);
                self.drain_fences()
            }
            StreamingChunk::Thinking(text) => {
                self.sink
                    .display_fragment(&DisplayFragment::ThinkingText { text: text.clone() })
            }
            StreamingChunk::StreamingComplete => {
                let rest = self.detector.take_remaining_text();
                self.emit_text(rest)?;
                if self.detector.is_fence_open() {
                    debug!("Stream ended inside tool call {}", self.current_id());
                    self.sink.display_fragment(&DisplayFragment::UnterminatedTool {
                        id: self.current_id(),
                    })?;
                }
                Ok(())
            }
        }
    }

    pub fn detector(&self) -> &FenceDetector {
        &self.detector
    }

    fn current_id(&self) -> String {
        tool_call_id(self.request_id, self.tool_counter)
    }

    fn emit_text(&self, text: String) -> Result<(), StreamError> {
        if text.is_empty() {
            return Ok(());
        }
        self.sink
            .display_fragment(&DisplayFragment::PlainText { text })
    }

    fn drain_fences(&mut self) -> Result<(), StreamError> {
        loop {
            let was_open = self.detector.is_fence_open();
            let detection = self.detector.detect_fence();
            self.emit_text(detection.text)?;

            // A fence opened during this poll, possibly closing right away
            if !was_open && (detection.fence.is_some() || self.detector.is_fence_open()) {
                self.tool_counter += 1;
                self.sink
                    .display_fragment(&DisplayFragment::ToolPending { id: self.current_id() })?;
            }

            let Some(body) = detection.fence else {
                return Ok(());
            };

            let fragment = match decode_tool_call(&body, self.current_id()) {
                Some(call) => DisplayFragment::ToolCall(call),
                None => DisplayFragment::MalformedTool {
                    id: self.current_id(),
                    raw: body,
                },
            };
            self.sink.display_fragment(&fragment)?;
        }
    }
}
