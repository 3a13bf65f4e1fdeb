use std::time::Duration;

use thiserror::Error;

/// Errors raised while talking to the editor's command listener.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No listener reachable at the configured address.
    #[error("failed to connect to {address}: {reason}")]
    Connect { address: String, reason: String },

    #[error("failed to encode command: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the connection before a parseable JSON value arrived.
    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("no response data within {0:?}")]
    ReadTimeout(Duration),

    #[error("write did not complete within {0:?}")]
    WriteTimeout(Duration),

    #[error("response exceeded {limit} bytes without becoming valid JSON")]
    ResponseTooLarge { limit: usize },

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Whether the failure happened before any command reached the editor.
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, EngineError::Connect { .. })
    }
}
