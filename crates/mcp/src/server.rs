//! MCP server exposing a `ToolRegistry`.
//!
//! Requests are answered strictly in arrival order; the Blueprint tools share
//! one editor connection anyway, so there is nothing to gain from running
//! calls concurrently.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use unreal_tool_runtime::{ToolContext, ToolRegistry};

use crate::error::McpError;
use crate::transport::McpTransport;
use crate::types::*;

pub struct McpServer {
    registry: ToolRegistry,
    server_name: String,
    server_version: String,
    instructions: Option<String>,
    initialized: bool,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            server_name: "unreal-mcp".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
            initialized: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Free-form usage hints returned from `initialize`.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve until the transport closes.
    pub async fn run<T: McpTransport>(&mut self, transport: &mut T) -> Result<(), McpError> {
        info!(server = %self.server_name, tools = self.registry.len(), "MCP server starting");

        while let Some(line) = transport.receive().await? {
            debug!(message = %line, "received");
            if let Some(response) = self.handle_message(&line).await {
                let json = serde_json::to_string(&response)?;
                debug!(response = %json, "sending");
                transport.send(&json).await?;
            }
        }

        info!("transport closed, shutting down");
        Ok(())
    }

    /// Handle one raw message. Notifications produce no response.
    pub async fn handle_message(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "unparseable message");
                return Some(JsonRpcResponse::failure(
                    RpcId::Null,
                    McpError::JsonParse(e).to_rpc_error(),
                ));
            }
        };

        if raw.get("id").is_none() {
            match serde_json::from_value::<JsonRpcNotification>(raw) {
                Ok(notification) => self.handle_notification(&notification),
                Err(e) => warn!(error = %e, "malformed notification ignored"),
            }
            return None;
        }

        let id = raw
            .get("id")
            .cloned()
            .and_then(|id| serde_json::from_value::<RpcId>(id).ok())
            .unwrap_or(RpcId::Null);

        match serde_json::from_value::<JsonRpcRequest>(raw) {
            Ok(request) => Some(self.handle_request(&request).await),
            Err(e) => {
                warn!(error = %e, "invalid request");
                let err = McpError::InvalidRequest(e.to_string());
                Some(JsonRpcResponse::failure(id, err.to_rpc_error()))
            }
        }
    }

    pub async fn handle_request(&mut self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(&request.params),
            "ping" => Ok(Value::Object(Default::default())),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(&id, &request.params).await,
            method => {
                warn!(method, "unknown method");
                Err(McpError::MethodNotFound(method.to_string()))
            }
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::failure(id, e.to_rpc_error()),
        }
    }

    fn handle_notification(&mut self, notification: &JsonRpcNotification) {
        match notification.method.as_str() {
            "notifications/initialized" => info!("client finished initialization"),
            "notifications/cancelled" => debug!(params = ?notification.params, "client cancelled a request"),
            method => debug!(method, "ignoring notification"),
        }
    }

    fn initialize(&mut self, params: &Option<Value>) -> Result<Value, McpError> {
        let params: InitializeParams = match params {
            Some(params) => parse_params(params)?,
            None => InitializeParams::default(),
        };
        let client = params.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown");
        info!(
            client,
            requested_version = params.protocol_version.as_deref().unwrap_or("-"),
            "initialize"
        );
        if self.initialized {
            warn!("client initialized twice");
        }
        self.initialized = true;

        to_result(InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
            },
            instructions: self.instructions.clone(),
        })
    }

    fn list_tools(&self) -> Result<Value, McpError> {
        let tools = self.registry.list().into_iter().map(ToolInfo::from).collect();
        to_result(ListToolsResult { tools })
    }

    async fn call_tool(&self, id: &RpcId, params: &Option<Value>) -> Result<Value, McpError> {
        let params: CallToolParams = match params {
            Some(params) => parse_params(params)?,
            None => return Err(McpError::InvalidParams("missing params".to_string())),
        };

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| McpError::ToolNotFound(params.name.clone()))?;

        if !self.initialized {
            warn!(tool = %params.name, "tools/call before initialize");
        }

        let context = ToolContext::new(id.to_string());
        let result = match tool.execute(params.arguments, &context).await {
            Ok(output) => CallToolResult::text(output.content, output.is_error),
            Err(e) => {
                warn!(tool = %params.name, error = %e, "tool failed");
                CallToolResult::text(e.to_string(), true)
            }
        };
        to_result(result)
    }
}

fn parse_params<T: DeserializeOwned>(params: &Value) -> Result<T, McpError> {
    serde_json::from_value(params.clone()).map_err(|e| McpError::InvalidParams(e.to_string()))
}

fn to_result<T: Serialize>(result: T) -> Result<Value, McpError> {
    Ok(serde_json::to_value(result)?)
}
