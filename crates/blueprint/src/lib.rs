//! MCP tools that edit Blueprint graphs inside a running Unreal editor.
//!
//! Every tool follows the same contract: fill in defaults for omitted
//! arguments, send exactly one command through a [`CommandSink`], and hand
//! the editor's reply back verbatim. Transport problems never escape as
//! errors; they become `{"success": false, "message": ...}` envelopes.
//!
//! - **envelope**: failure envelopes and response normalization
//! - **params**: node positions and free-form parameter maps
//! - **command**: the `BlueprintCommand` trait and its generic `CommandTool`
//! - **tools**: one typed command per editor operation
//! - **catalog**: registers the full tool set
//! - **workflow**: the scripted "Print String on BeginPlay" sequence
//!
//! [`CommandSink`]: unreal_engine_link::CommandSink

pub mod envelope;
pub mod params;
pub mod schema;
pub mod command;
pub mod tools;
pub mod catalog;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{register_blueprint_tools, TOOL_NAMES};
pub use command::{BlueprintCommand, CommandTool};
pub use envelope::{Outcome, CONNECT_FAILED_MESSAGE, NO_RESPONSE_MESSAGE};
pub use params::{NodePosition, ParamMap};
pub use workflow::{PrintStringWorkflow, WorkflowError, WorkflowReport};
