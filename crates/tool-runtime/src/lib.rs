//! Tool abstraction shared by the MCP server and the Blueprint tool catalog.

pub mod tool;
pub mod registry;

pub use tool::{Tool, ToolContext, ToolDefinition, ToolError, ToolResult};
pub use registry::{RegistryError, ToolRegistry};
