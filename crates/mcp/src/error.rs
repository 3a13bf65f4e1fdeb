use crate::types::{error_codes, JsonRpcError};

#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("Parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Reported as invalid params, per MCP.
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),
}

impl McpError {
    pub fn code(&self) -> i64 {
        match self {
            McpError::JsonParse(_) => error_codes::PARSE_ERROR,
            McpError::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            McpError::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            McpError::InvalidParams(_) | McpError::ToolNotFound(_) => error_codes::INVALID_PARAMS,
            McpError::Transport(_) => error_codes::INTERNAL_ERROR,
        }
    }

    pub fn to_rpc_error(&self) -> JsonRpcError {
        JsonRpcError {
            code: self.code(),
            message: self.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_is_invalid_params() {
        let err = McpError::ToolNotFound("spawn_actor".into());
        let rpc = err.to_rpc_error();
        assert_eq!(rpc.code, -32602);
        assert_eq!(rpc.message, "Unknown tool: spawn_actor");
    }

    #[test]
    fn test_parse_error_code() {
        let err = McpError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert_eq!(err.code(), -32700);
    }
}
