//! Typed editor commands and the generic tool that sends them.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use unreal_engine_link::{CommandSink, EngineError};
use unreal_tool_runtime::{Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

use crate::envelope::{self, Outcome};

/// One editor command with its argument struct.
///
/// The struct's serialized fields are exactly the `params` the editor
/// expects; defaults for omitted arguments are applied while deserializing.
pub trait BlueprintCommand: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Command name on the wire, also used as the tool name.
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn input_schema() -> Value;

    /// One-line description of this invocation for the log.
    fn summary(&self) -> String;

    /// The `params` object sent to the editor.
    fn to_params(&self) -> Result<Map<String, Value>, EngineError> {
        match serde_json::to_value(self).map_err(EngineError::Encode)? {
            Value::Object(map) => Ok(map),
            other => Err(EngineError::Decode(format!(
                "{} arguments serialized to non-object {other}",
                Self::NAME
            ))),
        }
    }

    /// Parse tool arguments; `null` is treated as an empty argument object.
    fn from_arguments(arguments: Value) -> Result<Self, serde_json::Error> {
        let arguments = match arguments {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        serde_json::from_value(arguments)
    }
}

/// Send a typed command and normalize the reply.
pub async fn dispatch<C: BlueprintCommand>(sink: &dyn CommandSink, command: &C) -> Outcome {
    let params = match command.to_params() {
        Ok(params) => params,
        Err(e) => {
            let message = format!("Error preparing {}: {e}", C::NAME);
            warn!(command = C::NAME, error = %e, "failed to build params");
            return Outcome::NoResponse(envelope::failure(message));
        }
    };
    envelope::normalize(sink.send_command(C::NAME, params).await)
}

/// Exposes a [`BlueprintCommand`] as an MCP tool.
pub struct CommandTool<C> {
    sink: Arc<dyn CommandSink>,
    _command: PhantomData<fn() -> C>,
}

impl<C: BlueprintCommand> CommandTool<C> {
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self {
            sink,
            _command: PhantomData,
        }
    }
}

#[async_trait]
impl<C: BlueprintCommand> Tool for CommandTool<C> {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: C::NAME.to_string(),
            description: C::DESCRIPTION.to_string(),
            input_schema: C::input_schema(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult, ToolError> {
        let command = match C::from_arguments(input) {
            Ok(command) => command,
            Err(e) => {
                warn!(tool = C::NAME, request_id = %context.request_id, error = %e, "invalid arguments");
                let message = format!("Invalid arguments for {}: {e}", C::NAME);
                return ToolResult::json(&envelope::failure(message), true);
            }
        };

        info!(tool = C::NAME, request_id = %context.request_id, "{}", command.summary());
        let outcome = dispatch(self.sink.as_ref(), &command).await;

        match &outcome {
            Outcome::Response(reply) if envelope::reports_success(reply) => {
                info!(tool = C::NAME, response = %reply, "command succeeded");
            }
            Outcome::Response(reply) => {
                warn!(tool = C::NAME, response = %reply, "editor reported failure");
            }
            _ => {}
        }

        ToolResult::json(outcome.value(), outcome.is_failure())
    }
}
