//! Common test utilities for the streaming module
use crate::streaming::{DisplayFragment, FragmentSink, StreamError};
use std::sync::{Arc, Mutex};

/// A sink that records every fragment it receives
#[derive(Clone, Default)]
pub struct TestSink {
    fragments: Arc<Mutex<Vec<DisplayFragment>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_fragments(&self) -> Vec<DisplayFragment> {
        self.fragments.lock().unwrap().clone()
    }
}

impl FragmentSink for TestSink {
    fn display_fragment(&self, fragment: &DisplayFragment) -> Result<(), StreamError> {
        self.fragments.lock().unwrap().push(fragment.clone());
        Ok(())
    }
}

/// A sink that refuses everything
pub struct FailingSink;

impl FragmentSink for FailingSink {
    fn display_fragment(&self, _fragment: &DisplayFragment) -> Result<(), StreamError> {
        Err(StreamError::Rejected("sink closed".to_string()))
    }
}

/// Split a string into chunks of `chunk_size` characters
pub fn chunk_str(s: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut chunks = Vec::new();

    for chunk in chars.chunks(chunk_size) {
        chunks.push(chunk.iter().collect::<String>());
    }

    chunks
}

/// Split a string at the given character positions
pub fn split_at_chars(s: &str, positions: &[usize]) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut chunks = Vec::new();
    let mut last = 0;

    for &pos in positions {
        let pos = pos.min(chars.len());
        if pos > last {
            chunks.push(chars[last..pos].iter().collect());
            last = pos;
        }
    }
    chunks.push(chars[last..].iter().collect());

    chunks
}
