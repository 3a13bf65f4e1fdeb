//! Model Context Protocol server for the Unreal Blueprint tools.
//!
//! JSON-RPC 2.0 over newline-delimited stdio. Supports `initialize`, `ping`,
//! `tools/list` and `tools/call`; every tool comes from a
//! [`ToolRegistry`](unreal_tool_runtime::ToolRegistry).
//!
//! - **types**: JSON-RPC envelopes and MCP payloads
//! - **transport**: line transports (stdio, in-memory channels)
//! - **server**: request dispatch
//! - **error**: protocol errors and their JSON-RPC codes
//!
//! ```no_run
//! use unreal_mcp::{McpServer, StdioTransport};
//! use unreal_tool_runtime::ToolRegistry;
//!
//! # async fn example() {
//! let mut server = McpServer::new(ToolRegistry::new());
//! let mut transport = StdioTransport::stdio();
//! server.run(&mut transport).await.unwrap();
//! # }
//! ```

pub mod types;
pub mod transport;
pub mod server;
pub mod error;

pub use types::*;
pub use transport::{ChannelTransport, LineTransport, McpTransport, StdioTransport};
pub use server::McpServer;
pub use error::McpError;
