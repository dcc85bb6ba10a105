//! Incremental Server-Sent Events decoding for run streams.
//!
//! Bytes arrive in arbitrary chunks, so the decoder buffers raw bytes until a
//! full line is available. That keeps multi-byte characters split across
//! chunks intact.

use serde_json::Value;

use crate::models::thread::ThreadValues;

/// A decoded SSE frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseFrame {
    /// `event:` field; `None` means the default `message` event.
    pub event: Option<String>,
    /// `data:` lines joined with `\n`.
    pub data: String,
    /// `id:` field.
    pub id: Option<String>,
}

/// Byte-chunk SSE decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
    id: Option<String>,
}

impl SseDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk and returns the frames it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);
        let mut frames = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=newline).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if let Some(frame) = self.process_line(&String::from_utf8_lossy(&line)) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Flushes a trailing frame that was not terminated by a blank line.
    pub fn finish(&mut self) -> Option<SseFrame> {
        if !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&line);
            let line = line.strip_suffix('\r').unwrap_or(&line).to_string();
            if let Some(frame) = self.process_line(&line) {
                return Some(frame);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<SseFrame> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => self.data.push(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            "id" => self.id = Some(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        if self.data.is_empty() {
            self.event = None;
            return None;
        }
        Some(SseFrame {
            event: self.event.take(),
            data: std::mem::take(&mut self.data).join("\n"),
            id: self.id.take(),
        })
    }
}

/// A run stream event the client acts upon.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Run identity, needed to cancel it.
    Metadata {
        /// Run identifier.
        run_id: String,
    },
    /// Full thread state after a step.
    Values(ThreadValues),
    /// The run failed on the server.
    Error {
        /// Human readable message.
        message: String,
    },
    /// The stream is complete.
    End,
    /// Anything else, including subgraph events.
    Other {
        /// Event name.
        event: String,
    },
}

impl RunEvent {
    /// Classifies a frame. Unreadable payloads of known events degrade to
    /// [`RunEvent::Other`] rather than failing the stream.
    pub fn from_frame(frame: &SseFrame) -> Self {
        let event = frame.event.as_deref().unwrap_or("message");
        let payload = || serde_json::from_str::<Value>(&frame.data).ok();
        match event {
            "metadata" => payload()
                .and_then(|value| value.get("run_id").and_then(Value::as_str).map(str::to_string))
                .map_or_else(
                    || RunEvent::Other {
                        event: event.into(),
                    },
                    |run_id| RunEvent::Metadata { run_id },
                ),
            "values" => payload().map_or_else(
                || {
                    tracing::debug!("ignoring unreadable values frame");
                    RunEvent::Other {
                        event: event.into(),
                    }
                },
                |value| RunEvent::Values(ThreadValues::from_value(&value)),
            ),
            "error" => RunEvent::Error {
                message: error_message(&frame.data),
            },
            "end" => RunEvent::End,
            other => RunEvent::Other {
                event: other.into(),
            },
        }
    }
}

fn error_message(data: &str) -> String {
    match serde_json::from_str::<Value>(data) {
        Ok(Value::String(message)) => message,
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map_or_else(|| value.to_string(), str::to_string),
        Err(_) => data.to_string(),
    }
}
