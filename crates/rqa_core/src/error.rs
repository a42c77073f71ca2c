use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned by every fallible ragqa operation.
///
/// Rendering itself never fails; errors come from the payloads and files
/// around it. `code` is grouped by where the failure arose:
///
/// - `CONFIG_INVALID` / `CONFIG_UNREADABLE`: a `.ragqa.toml` that is
///   malformed or missing on disk. A bad delimiter pair is `CONFIG_INVALID`.
/// - `RESPONSE_INVALID` / `RESPONSE_ERROR` / `RESPONSE_EMPTY`: chat responses
///   and feedback lists. `RESPONSE_ERROR` carries the backend's own message.
/// - `STREAM_CHUNK_INVALID` / `STREAM_ERROR` / `STREAM_FINISHED`: NDJSON answer
///   streams. Only `STREAM_ERROR` is `retryable`, since the backend gave up
///   mid-answer and asking again may succeed.
/// - `EVAL_INVALID`: experiment result files.
/// - `IO_FAILED` / `OUTPUT_SERIALIZE_FAILED`: CLI input and output, with the
///   path in `details`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Wrap an I/O failure on `path` under the `IO_FAILED` code.
    pub fn io(message: impl Into<String>, path: &str, err: &std::io::Error) -> Self {
        Self::new("IO_FAILED", message).with_details(format!("path={path}; err={err}"))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}
