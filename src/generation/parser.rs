//! Incremental JSON parser for streamed generation output
//!
//! Ollama streams one JSON object per chunk, but network reads do not
//! respect object boundaries. The parser accumulates bytes and yields each
//! complete top-level object with a single-pass bracket match that ignores
//! braces inside strings.

use serde::Deserialize;

use crate::generation::backend::{GenerationError, GenerationResult};

/// Maximum buffer size (1MB)
pub const MAX_BUFFER_SIZE: usize = 1_048_576;

/// One streamed `/api/generate` chunk
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StreamChunk {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Incremental JSON parser
#[derive(Debug)]
pub struct JsonParser {
    buffer: Vec<u8>,
    max_buffer_size: usize,
}

impl JsonParser {
    /// Create new JSON parser with default settings
    pub fn new() -> Self {
        Self::with_capacity(MAX_BUFFER_SIZE)
    }

    /// Create parser with custom buffer capacity
    pub fn with_capacity(max_buffer_size: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            max_buffer_size,
        }
    }

    /// Append bytes and return every object completed by them.
    pub fn push(&mut self, bytes: &[u8]) -> GenerationResult<Vec<String>> {
        if self.buffer.len() + bytes.len() > self.max_buffer_size {
            return Err(GenerationError::InvalidResponse(format!(
                "Buffer overflow: {} bytes exceeds maximum {}",
                self.buffer.len() + bytes.len(),
                self.max_buffer_size
            )));
        }
        self.buffer.extend_from_slice(bytes);

        let mut objects = Vec::new();
        while let Some(object) = self.next_object()? {
            objects.push(object);
        }
        Ok(objects)
    }

    /// Pop the next complete object from the buffer, if any
    pub fn next_object(&mut self) -> GenerationResult<Option<String>> {
        match self.find_complete_json()? {
            Some((start, end)) => {
                let json = String::from_utf8_lossy(&self.buffer[start..=end]).to_string();
                self.buffer.drain(..=end);
                Ok(Some(json))
            }
            None => Ok(None),
        }
    }

    fn find_complete_json(&self) -> GenerationResult<Option<(usize, usize)>> {
        let mut depth: i64 = 0;
        let mut start: Option<usize> = None;
        let mut in_string = false;
        let mut escape_next = false;

        // Only ASCII delimiters matter, and UTF-8 continuation bytes never
        // collide with them, so a byte walk is safe.
        for (i, &byte) in self.buffer.iter().enumerate() {
            if escape_next {
                escape_next = false;
                continue;
            }
            if byte == b'\\' && in_string {
                escape_next = true;
                continue;
            }
            if byte == b'"' {
                in_string = !in_string;
                continue;
            }
            if in_string {
                continue;
            }

            match byte {
                b'{' => {
                    if depth == 0 {
                        start = Some(i);
                    }
                    depth += 1;
                }
                b'}' => {
                    depth -= 1;
                    if depth < 0 {
                        return Err(GenerationError::InvalidResponse(
                            "Mismatched braces: too many closing braces".to_string(),
                        ));
                    }
                    if depth == 0 {
                        if let Some(start) = start {
                            return Ok(Some((start, i)));
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(None)
    }

    /// Parse an extracted object as a stream chunk
    pub fn parse_chunk(json: &str) -> GenerationResult<StreamChunk> {
        serde_json::from_str(json)
            .map_err(|e| GenerationError::InvalidResponse(format!("Failed to parse chunk: {}", e)))
    }

    /// Get current buffer size
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// True if only whitespace remains buffered
    pub fn is_drained(&self) -> bool {
        self.buffer.iter().all(|b| b.is_ascii_whitespace())
    }
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new()
    }
}
