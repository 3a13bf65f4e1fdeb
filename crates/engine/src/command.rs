//! Request envelope sent to the editor listener.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EngineError;

/// One command: `{"type": <command>, "params": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    #[serde(rename = "type")]
    pub command: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl CommandEnvelope {
    pub fn new(command: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            command: command.into(),
            params,
        }
    }

    /// Compact UTF-8 JSON, written to the socket as-is.
    pub fn encode(&self) -> Result<Vec<u8>, EngineError> {
        serde_json::to_vec(self).map_err(EngineError::Encode)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, EngineError> {
        serde_json::from_slice(bytes).map_err(|e| EngineError::Decode(e.to_string()))
    }
}
