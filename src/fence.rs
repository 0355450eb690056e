//! Fence markers and the span finder shared by streaming and batch parsing
//!
//! A fence is a block of lines:
//!
//! ````text
//! ```tool_call
//! {"name": "get_weather", "arguments": {"city": "Berlin"}}
//! ```
//! ````
//!
//! The opening line must consist of the open marker alone (surrounding
//! spaces and tabs are ignored) and must be terminated by a newline. The
//! closing line must consist of the close marker alone and may be
//! terminated by a newline or by the end of the text. Everything between
//! the two lines is the body.

use crate::config::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

pub const DEFAULT_CALL_MARKER: &str = "```tool_call";
pub const DEFAULT_RESULT_MARKER: &str = "```tool_result";
pub const DEFAULT_CLOSE_MARKER: &str = "```";

/// The literal markers of the protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FenceSyntax {
    /// Opens a block the model writes to invoke a tool
    pub call_marker: String,
    /// Opens a block carrying a tool result back to the model
    pub result_marker: String,
    /// Closes both kinds of blocks
    pub close_marker: String,
}

impl Default for FenceSyntax {
    fn default() -> Self {
        Self {
            call_marker: DEFAULT_CALL_MARKER.to_string(),
            result_marker: DEFAULT_RESULT_MARKER.to_string(),
            close_marker: DEFAULT_CLOSE_MARKER.to_string(),
        }
    }
}

impl FenceSyntax {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (what, marker) in [
            ("call marker", &self.call_marker),
            ("result marker", &self.result_marker),
            ("close marker", &self.close_marker),
        ] {
            if marker.is_empty() {
                return Err(ConfigError::InvalidSyntax(format!("{what} is empty")));
            }
            if marker.contains(['\n', '\r']) {
                return Err(ConfigError::InvalidSyntax(format!(
                    "{what} must fit on a single line"
                )));
            }
            // Marker lines are compared after trimming
            if marker.trim() != marker.as_str() {
                return Err(ConfigError::InvalidSyntax(format!(
                    "{what} has surrounding whitespace"
                )));
            }
        }

        if self.call_marker == self.result_marker {
            return Err(ConfigError::InvalidSyntax(
                "call and result markers must differ".to_string(),
            ));
        }
        if self.call_marker == self.close_marker || self.result_marker == self.close_marker {
            return Err(ConfigError::InvalidSyntax(
                "open markers must differ from the close marker".to_string(),
            ));
        }

        Ok(())
    }

    pub fn call_pattern(&self) -> Result<FencePattern, ConfigError> {
        FencePattern::new(&self.call_marker, &self.close_marker)
    }

    pub fn result_pattern(&self) -> Result<FencePattern, ConfigError> {
        FencePattern::new(&self.result_marker, &self.close_marker)
    }
}

/// Byte offsets of one complete fence within a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSpan {
    /// Start of the opening marker line
    pub start: usize,
    pub body_start: usize,
    /// Start of the closing marker line
    pub body_end: usize,
    /// End of the closing marker, before its line terminator
    pub end: usize,
}

impl FenceSpan {
    pub fn body<'a>(&self, text: &'a str) -> &'a str {
        text[self.body_start..self.body_end].trim()
    }
}

/// Position of an opening marker line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FenceOpen {
    pub start: usize,
    pub body_start: usize,
}

/// Compiled recognizer for one open marker plus the close marker
#[derive(Debug, Clone)]
pub struct FencePattern {
    open: Regex,
    close: Regex,
}

impl FencePattern {
    pub fn new(open_marker: &str, close_marker: &str) -> Result<Self, ConfigError> {
        let open = Regex::new(&format!(
            r"(?m)^[ \t]*{}[ \t]*\r?\n",
            regex::escape(open_marker)
        ))?;
        let close = Regex::new(&format!(
            r"(?m)^[ \t]*{}[ \t]*\r?$",
            regex::escape(close_marker)
        ))?;
        Ok(Self { open, close })
    }

    /// Find the first opening line that starts at or after `from`
    pub(crate) fn find_open(&self, text: &str, from: usize) -> Option<FenceOpen> {
        self.open.find_at(text, from).map(|m| FenceOpen {
            start: m.start(),
            body_start: m.end(),
        })
    }

    /// Find the first closing line that starts at or after `from`.
    /// Returns the start of the line and the end of the marker.
    pub(crate) fn find_close(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        self.close.find_at(text, from).map(|m| (m.start(), m.end()))
    }

    /// Find the first complete fence at or after `from`
    pub fn find(&self, text: &str, from: usize) -> Option<FenceSpan> {
        let open = self.find_open(text, from)?;
        let (body_end, end) = self.find_close(text, open.body_start)?;
        trace!("Found fence at {}..{}", open.start, end);
        Some(FenceSpan {
            start: open.start,
            body_start: open.body_start,
            body_end,
            end,
        })
    }

    /// Iterate over all non-overlapping complete fences in `text`
    pub fn spans<'p, 't>(&'p self, text: &'t str) -> FenceSpans<'p, 't> {
        FenceSpans {
            pattern: self,
            text,
            pos: 0,
        }
    }
}

pub struct FenceSpans<'p, 't> {
    pattern: &'p FencePattern,
    text: &'t str,
    pos: usize,
}

impl Iterator for FenceSpans<'_, '_> {
    type Item = FenceSpan;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos > self.text.len() {
            return None;
        }
        let span = self.pattern.find(self.text, self.pos)?;
        self.pos = span.end;
        Some(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call_pattern() -> FencePattern {
        FenceSyntax::default().call_pattern().unwrap()
    }

    #[test]
    fn test_finds_simple_fence() {
        let text = "```tool_call\n{\"name\":\"test\",\"arguments\":{}}\n```";
        let span = call_pattern().find(text, 0).unwrap();
        assert_eq!(span.start, 0);
        assert_eq!(span.end, text.len());
        assert_eq!(span.body(text), "{\"name\":\"test\",\"arguments\":{}}");
        assert_eq!(&text[span.start..span.end], text);
    }

    #[test]
    fn test_marker_must_be_alone_on_its_line() {
        let pattern = call_pattern();
        assert!(pattern
            .find("Say ```tool_call\n{}\n```", 0)
            .is_none());
        assert!(pattern
            .find("```tool_calls\n{}\n```", 0)
            .is_none());
        // Closing marker followed by a language tag is not a close
        assert!(pattern
            .find("```tool_call\n{}\n```json\n", 0)
            .is_none());
    }

    #[test]
    fn test_tolerates_indentation_and_crlf() {
        let text = "Intro\r\n  ```tool_call  \r\n{\"name\":\"a\"}\r\n  ```\r\nOutro";
        let span = call_pattern().find(text, 0).unwrap();
        assert_eq!(span.body(text), "{\"name\":\"a\"}");
        assert_eq!(&text[span.end..], "\nOutro");
        assert_eq!(&text[..span.start], "Intro\r\n");
    }

    #[test]
    fn test_opening_line_needs_terminator() {
        assert!(call_pattern().find("```tool_call", 0).is_none());
        assert!(call_pattern().find_open("```tool_call\n", 0).is_some());
    }

    #[test]
    fn test_empty_body() {
        let text = "```tool_call\n```";
        let span = call_pattern().find(text, 0).unwrap();
        assert_eq!(span.body(text), "");
    }

    #[test]
    fn test_spans_are_sequential() {
        let text = "```tool_call\n{\"n\":1}\n```\ntext\n```tool_call\n{\"n\":2}\n```\n";
        let pattern = call_pattern();
        let bodies: Vec<&str> = pattern.spans(text).map(|s| s.body(text)).collect();
        assert_eq!(bodies, vec!["{\"n\":1}", "{\"n\":2}"]);
    }

    #[test]
    fn test_result_pattern_ignores_call_fences() {
        let syntax = FenceSyntax::default();
        let text = "```tool_call\n{}\n```\n```tool_result\n{\"x\":1}\n```";
        let results = syntax.result_pattern().unwrap();
        let spans: Vec<FenceSpan> = results.spans(text).collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].body(text), "{\"x\":1}");
    }

    #[test]
    fn test_syntax_validation() {
        assert!(FenceSyntax::default().validate().is_ok());

        let same = FenceSyntax {
            result_marker: DEFAULT_CALL_MARKER.to_string(),
            ..FenceSyntax::default()
        };
        assert!(same.validate().is_err());

        let multiline = FenceSyntax {
            call_marker: "<<call\n>>".to_string(),
            ..FenceSyntax::default()
        };
        assert!(multiline.validate().is_err());

        let padded = FenceSyntax {
            close_marker: " ``` ".to_string(),
            ..FenceSyntax::default()
        };
        assert!(padded.validate().is_err());

        let closes_itself = FenceSyntax {
            call_marker: DEFAULT_CLOSE_MARKER.to_string(),
            ..FenceSyntax::default()
        };
        assert!(closes_itself.validate().is_err());
    }

    #[test]
    fn test_custom_markers_are_matched_literally() {
        let pattern = FencePattern::new("[[call]]", "[[end]]").unwrap();
        let text = "[[call]]\n{\"name\":\"x\"}\n[[end]]";
        assert_eq!(pattern.find(text, 0).unwrap().body(text), "{\"name\":\"x\"}");
        // Regex metacharacters in markers carry no special meaning
        assert!(pattern.find("[call]\n{}\n[[end]]", 0).is_none());
    }
}
