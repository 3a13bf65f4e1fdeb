use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Describes a tool's interface as advertised to MCP clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name (e.g., "add_blueprint_event_node")
    pub name: String,
    /// Human-readable description shown to the agent
    pub description: String,
    /// JSON Schema describing the expected arguments
    pub input_schema: Value,
}

/// Result of executing a tool, relayed back to the MCP client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Result content (JSON text for every Blueprint tool)
    pub content: String,
    /// Whether this result represents a failure at the tool boundary
    pub is_error: bool,
}

impl ToolResult {
    /// A successful plain-text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Render a JSON value as the result body.
    pub fn json(value: &Value, is_error: bool) -> Result<Self, ToolError> {
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| ToolError::ExecutionFailed(format!("JSON serialization failed: {e}")))?;
        Ok(Self { content, is_error })
    }
}

/// Per-invocation context supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Identifier of the request that triggered this call, for log correlation.
    pub request_id: String,
}

impl ToolContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

/// The primary extension point: all tools implement this trait.
///
/// Tools are object-safe, Send + Sync, and async.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's definition (name, description, JSON Schema).
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given JSON arguments.
    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult, ToolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl fmt::Display for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.description)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::EchoTool;
    use super::*;

    #[test]
    fn test_json_result_is_pretty_printed() {
        let result = ToolResult::json(&serde_json::json!({"status": "success"}), false).unwrap();
        assert!(result.content.contains('\n'));
        assert!(!result.is_error);
        let parsed: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed["status"], "success");
    }

    #[test]
    fn test_definition_display() {
        let def = EchoTool.definition();
        assert_eq!(def.to_string(), "echo(Echoes back the input message.)");
    }

    #[tokio::test]
    async fn test_echo_tool_missing_message() {
        let err = EchoTool
            .execute(serde_json::json!({}), &ToolContext::new("1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
