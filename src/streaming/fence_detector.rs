use crate::fence::FencePattern;
use crate::protocol::default_protocol;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceState {
    /// No opening marker line seen since the last fence
    Searching,
    /// Opening marker line matched, waiting for the closing line
    InFence,
}

/// Result of one poll of [`FenceDetector::detect_fence`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FenceDetection {
    /// Text outside of fences that can no longer become part of a fence.
    /// It precedes `fence` in the buffer.
    pub text: String,
    /// Trimmed body of the next complete fence, `None` while not yet available
    pub fence: Option<String>,
}

/// Incremental fence recognizer for one streamed response.
///
/// Chunks are concatenated into a buffer and the result only ever depends
/// on the buffer content, never on where chunks were split. Each completed
/// fence is returned exactly once.
#[derive(Debug, Clone)]
pub struct FenceDetector {
    pattern: FencePattern,
    buffer: String,
    /// Where the body of the open fence starts
    open_body_start: Option<usize>,
    /// Read cursor. Text before it was either returned as part of a fence
    /// or handed out as settled text.
    cursor: usize,
}

impl Default for FenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FenceDetector {
    /// Detector for the default tool call marker
    pub fn new() -> Self {
        Self::with_pattern(default_protocol().call_pattern().clone())
    }

    pub fn with_pattern(pattern: FencePattern) -> Self {
        Self {
            pattern,
            buffer: String::new(),
            open_body_start: None,
            cursor: 0,
        }
    }

    pub fn add_chunk(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn detect_fence(&mut self) -> FenceDetection {
        let mut text = String::new();
        loop {
            match self.open_body_start {
                None => match self.pattern.find_open(&self.buffer, self.cursor) {
                    Some(open) => {
                        trace!("Fence opened at {}", open.start);
                        text.push_str(&self.buffer[self.cursor..open.start]);
                        self.open_body_start = Some(open.body_start);
                        self.cursor = open.body_start;
                    }
                    None => {
                        // The last line may still grow into an opening line
                        let settled = self.last_line_start();
                        text.push_str(&self.buffer[self.cursor..settled]);
                        self.cursor = settled;
                        return FenceDetection { text, fence: None };
                    }
                },
                Some(body_start) => match self.pattern.find_close(&self.buffer, self.cursor) {
                    Some((body_end, end)) => {
                        trace!("Fence closed at {}", end);
                        let fence = self.buffer[body_start..body_end].trim().to_string();
                        self.open_body_start = None;
                        self.cursor = end;
                        return FenceDetection {
                            text,
                            fence: Some(fence),
                        };
                    }
                    None => {
                        self.cursor = self.last_line_start();
                        return FenceDetection { text, fence: None };
                    }
                },
            }
        }
    }

    /// Take the text after the last fence once the stream has ended.
    /// Returns nothing while a fence is still open.
    pub fn take_remaining_text(&mut self) -> String {
        if self.is_fence_open() {
            return String::new();
        }
        let rest = self.buffer[self.cursor..].to_string();
        self.cursor = self.buffer.len();
        rest
    }

    pub fn state(&self) -> FenceState {
        match self.open_body_start {
            Some(_) => FenceState::InFence,
            None => FenceState::Searching,
        }
    }

    pub fn is_fence_open(&self) -> bool {
        self.state() == FenceState::InFence
    }

    /// Everything received so far
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    fn last_line_start(&self) -> usize {
        self.buffer[self.cursor..]
            .rfind('\n')
            .map_or(self.cursor, |pos| self.cursor + pos + 1)
    }
}
