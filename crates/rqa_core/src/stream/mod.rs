use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{ChatAppResponse, ResponseChoice, ResponseContext, ResponseMessage};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseDelta {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: Option<ResponseDelta>,
    #[serde(default)]
    pub context: Option<ResponseContext>,
    #[serde(default)]
    pub session_state: Option<serde_json::Value>,
}

/// One newline-delimited JSON event of a streamed chat answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatAppResponseChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Accumulates streamed answer chunks into a growing answer text.
///
/// Every value returned by [`AnswerStream::text`] is a prefix of every later
/// value, which is the ordering the answer renderer relies on while streaming.
#[derive(Debug, Clone, Default)]
pub struct AnswerStream {
    text: String,
    role: Option<String>,
    context: ResponseContext,
    session_state: serde_json::Value,
    chunks_seen: usize,
    finished: bool,
}

impl AnswerStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one NDJSON line. Returns `true` when the answer text grew.
    pub fn push_line(&mut self, line: &str) -> Result<bool, AppError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(false);
        }
        if self.finished {
            return Err(AppError::new(
                "STREAM_FINISHED",
                "Received a chunk after the stream was finished",
            ));
        }
        let chunk: ChatAppResponseChunk = serde_json::from_str(line).map_err(|e| {
            AppError::new("STREAM_CHUNK_INVALID", "Failed to parse stream chunk")
                .with_details(format!("chunk={}; err={e}", self.chunks_seen))
        })?;
        self.push_chunk(chunk)
    }

    pub fn push_chunk(&mut self, chunk: ChatAppResponseChunk) -> Result<bool, AppError> {
        self.chunks_seen += 1;
        if let Some(error) = chunk.error {
            log::warn!("stream reported an error after {} chunks", self.chunks_seen);
            return Err(AppError::new("STREAM_ERROR", "Backend reported a stream error")
                .with_details(error)
                .with_retryable(true));
        }

        let before = self.text.len();
        for choice in chunk.choices {
            if let Some(context) = choice.context {
                self.context = context;
            }
            if let Some(state) = choice.session_state {
                self.session_state = state;
            }
            if let Some(delta) = choice.delta {
                if let Some(role) = delta.role {
                    self.role = Some(role);
                }
                if let Some(content) = delta.content {
                    self.text.push_str(&content);
                }
            }
        }
        Ok(self.text.len() > before)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> &ResponseContext {
        &self.context
    }

    pub fn chunks_seen(&self) -> usize {
        self.chunks_seen
    }

    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Whether more text may still arrive.
    pub fn is_streaming(&self) -> bool {
        !self.finished
    }

    pub fn into_response(self) -> ChatAppResponse {
        ChatAppResponse {
            choices: vec![ResponseChoice {
                index: 0,
                message: ResponseMessage {
                    content: self.text,
                    role: self.role.unwrap_or_else(|| "assistant".to_string()),
                },
                context: self.context,
                session_state: self.session_state,
            }],
        }
    }
}

/// Replay a whole NDJSON body, calling `on_frame` with every growing prefix.
///
/// The stream is marked finished once the body is exhausted.
pub fn replay_ndjson<F>(body: &str, mut on_frame: F) -> Result<AnswerStream, AppError>
where
    F: FnMut(&AnswerStream),
{
    let mut stream = AnswerStream::new();
    for line in body.lines() {
        if stream.push_line(line)? {
            on_frame(&stream);
        }
    }
    stream.finish();
    log::debug!(
        "replayed {} chunks into {} bytes of answer text",
        stream.chunks_seen(),
        stream.text().len()
    );
    Ok(stream)
}
